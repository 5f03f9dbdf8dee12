//! News browsing core: article model, filters, paginator, category menu.
//!
//! - `types` - `Article`, `Category` and the `NewsBundle` a source delivers
//! - `filter` - case-insensitive category and title substring filters
//! - `pager` - offset/rows paginator with a fixed default page size
//! - `menu` - collapsible category menu state
//! - `browser` - selection state tying the above together

mod browser;
mod filter;
mod menu;
mod pager;
mod types;

pub use browser::{NewsBrowser, SearchScope};
pub use filter::{contains_ignore_case, filter_by_category, filter_by_title};
pub use menu::{CategoryMenu, COMPACT_BREAKPOINT};
pub use pager::{Paginator, PAGE_SIZE};
pub use types::{Article, Category, NewsBundle};

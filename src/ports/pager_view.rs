//! Pager view port - the table/pager widget fed by a list controller.

use crate::domain::listing::PagerUpdate;

/// Receives the rows and totals of each applied page.
///
/// Called synchronously from the controller; implementations must not block.
pub trait PagerView<T>: Send + Sync {
    fn render(&self, update: PagerUpdate<T>);
}

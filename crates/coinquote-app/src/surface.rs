use crate::view::{Notice, View};
use coinquote_client::CatalogEntry;

/// Whatever draws the selectors, the output region and the notification.
///
/// Implementations are called from the flows in this crate and from the notification timer
/// task, hence `Send + Sync + 'static`.
pub trait Surface: Send + Sync + 'static {
    /// Append `entries` as options of the crypto selector, in order.
    fn populate(&self, entries: &[CatalogEntry]);

    /// Replace the output region with `view`.
    fn render(&self, view: &View);

    fn show_notice(&self, notice: &Notice);

    fn dismiss_notice(&self);
}

mod notifier;
#[allow(clippy::module_inception)]
mod host;

pub use {
    host::{Host, MenuPresenter, SourceBackend},
    notifier::SelectionNotifier,
};

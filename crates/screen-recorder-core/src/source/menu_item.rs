use crate::source::CaptureSource;

/// One entry of the native source picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Id of the [`CaptureSource`] this item stands for.
    pub id: String,
    /// Text shown in the menu.
    pub label: String,
}

impl From<&CaptureSource> for MenuItem {
    fn from(source: &CaptureSource) -> Self {
        Self {
            id: source.id.clone(),
            label: source.name.clone(),
        }
    }
}

/// Projects sources to picker entries, preserving order.
pub fn menu_items(sources: &[CaptureSource]) -> Vec<MenuItem> {
    sources.iter().map(MenuItem::from).collect()
}

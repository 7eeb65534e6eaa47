use crate::db::{ModelId, ModelRecord};

/// Cosmetic badge shown on every card. It asserts nothing about the payload.
pub const VERIFIED_BADGE: &str = "App Safe Model Verified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Public,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// `data:` URL of the stored thumbnail.
    Image(String),
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Download,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCard {
    pub id: ModelId,
    pub name: String,
    pub preview: Preview,
    pub badge: &'static str,
    pub actions: Vec<CardAction>,
}

impl ModelCard {
    fn from_record(record: &ModelRecord, mode: ViewMode) -> Self {
        let preview = if record.thumbnail.is_empty() {
            Preview::Placeholder
        } else {
            Preview::Image(record.thumbnail.clone())
        };
        let actions = match mode {
            ViewMode::Public => vec![CardAction::Download],
            ViewMode::Admin => vec![CardAction::Download, CardAction::Delete],
        };
        Self {
            id: record.id,
            name: record.name.clone(),
            preview,
            badge: VERIFIED_BADGE,
            actions,
        }
    }

    pub fn can_delete(&self) -> bool {
        self.actions.contains(&CardAction::Delete)
    }
}

/// What a listing shows: either the empty-state indicator or one card per record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogView {
    #[default]
    Empty,
    Cards(Vec<ModelCard>),
}

impl CatalogView {
    /// Map records to cards, keeping the order they were received in.
    pub fn build(records: &[ModelRecord], mode: ViewMode) -> Self {
        if records.is_empty() {
            return CatalogView::Empty;
        }
        CatalogView::Cards(
            records
                .iter()
                .map(|r| ModelCard::from_record(r, mode))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CatalogView::Empty)
    }

    pub fn cards(&self) -> &[ModelCard] {
        match self {
            CatalogView::Empty => &[],
            CatalogView::Cards(cards) => cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }
}

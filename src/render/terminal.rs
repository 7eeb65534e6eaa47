use crate::render::view::{CardAction, CatalogView, ModelCard, Preview, ViewMode};
use std::fmt::Write;

pub const EMPTY_STATE: &str = "No models available yet.";

/// Plain-text rendering of a listing.
pub fn render(view: &CatalogView, mode: ViewMode) -> String {
    let mut out = String::new();
    let title = match mode {
        ViewMode::Public => "Models",
        ViewMode::Admin => "Admin / Uploaded models",
    };
    let _ = writeln!(out, "== {title} ==");

    if view.is_empty() {
        let _ = writeln!(out, "  {EMPTY_STATE}");
        return out;
    }

    for card in view.cards() {
        render_card(&mut out, card);
    }
    out
}

fn render_card(out: &mut String, card: &ModelCard) {
    let _ = writeln!(out, "  [{}] {}", card.id, card.name);
    let preview = match &card.preview {
        Preview::Image(url) => describe_data_url(url),
        Preview::Placeholder => "[cube]".to_string(),
    };
    let _ = writeln!(out, "      preview: {preview}");
    let _ = writeln!(out, "      + {}", card.badge);

    let actions: Vec<String> = card
        .actions
        .iter()
        .map(|a| match a {
            CardAction::Download => format!("download {}", card.id),
            CardAction::Delete => format!("delete {}", card.id),
        })
        .collect();
    let _ = writeln!(out, "      actions: {}", actions.join(" | "));
}

/// Terminals cannot show the image, so print its media type and encoded size.
fn describe_data_url(url: &str) -> String {
    let mime = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .filter(|m| !m.is_empty())
        .unwrap_or("image");
    let encoded_len = url.split_once(',').map(|(_, d)| d.len()).unwrap_or(0);
    format!("{mime} image ({encoded_len} chars)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewModelRecord;

    #[test]
    fn empty_view_prints_indicator_only() {
        let text = render(&CatalogView::Empty, ViewMode::Admin);
        assert!(text.contains(EMPTY_STATE));
        assert!(!text.contains("download"));
    }

    #[test]
    fn admin_cards_list_delete_action() {
        let records = vec![
            NewModelRecord::new("Sacred Mandala", "data:image/png;base64,AAAA".into(), vec![])
                .with_id(7),
        ];
        let admin = render(&CatalogView::build(&records, ViewMode::Admin), ViewMode::Admin);
        let public = render(&CatalogView::build(&records, ViewMode::Public), ViewMode::Public);

        assert!(admin.contains("[7] Sacred Mandala"));
        assert!(admin.contains("download 7 | delete 7"));
        assert!(admin.contains("image/png image (4 chars)"));
        assert!(public.contains("download 7"));
        assert!(!public.contains("delete 7"));
        assert!(!public.contains(EMPTY_STATE));
    }
}

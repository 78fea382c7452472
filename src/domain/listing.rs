// src/domain/listing.rs

/// Expansion state of the report list. At most one card is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    expanded: Option<String>,
}

impl ListView {
    /// Clicking the open card closes it; clicking any other card opens that one instead.
    pub fn toggle(&mut self, report_id: &str) {
        if self.is_expanded(report_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(report_id.to_string());
        }
    }

    pub fn is_expanded(&self, report_id: &str) -> bool {
        self.expanded.as_deref() == Some(report_id)
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }
}

use crate::user::Tag;
use serde::{Deserialize, Serialize};

/// A top-level navigation entry.
///
/// An entry either links somewhere directly (`href`), groups `sub_items`, or both.
/// Static configuration: it is never persisted or edited by users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub icon: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_items: Option<Vec<SubMenuItem>>,
    #[serde(default)]
    pub tag: Tag,
    #[serde(default = "default_can_mobile")]
    pub can_mobile: bool,
}

/// A second-level navigation entry. Nesting stops here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubMenuItem {
    pub icon: String,
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub tag: Tag,
}

const fn default_can_mobile() -> bool {
    true
}

impl MenuItem {
    /// A direct link entry visible on every device.
    pub fn link(
        icon: impl Into<String>,
        label: impl Into<String>,
        href: impl Into<String>,
        tag: impl Into<Tag>,
    ) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            href: Some(href.into()),
            sub_items: None,
            tag: tag.into(),
            can_mobile: true,
        }
    }

    /// A grouping entry without a direct link.
    pub fn group(
        icon: impl Into<String>,
        label: impl Into<String>,
        tag: impl Into<Tag>,
        sub_items: Vec<SubMenuItem>,
    ) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            href: None,
            sub_items: Some(sub_items),
            tag: tag.into(),
            can_mobile: true,
        }
    }

    /// Marks the entry as hidden on mobile devices.
    #[must_use]
    pub fn desktop_only(mut self) -> Self {
        self.can_mobile = false;
        self
    }
}

impl SubMenuItem {
    pub fn new(
        icon: impl Into<String>,
        label: impl Into<String>,
        href: impl Into<String>,
        tag: impl Into<Tag>,
    ) -> Self {
        Self { icon: icon.into(), label: label.into(), href: href.into(), tag: tag.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn menu_item_uses_camel_case_and_defaults() {
        let item: MenuItem = serde_json::from_value(json!({
            "icon": "folder",
            "label": "Cadastros",
            "subItems": [{ "icon": "bank", "label": "Bancos", "href": "/bancos", "tag": 1003 }]
        }))
        .unwrap();

        assert!(item.can_mobile);
        assert_eq!(item.tag, Tag::PUBLIC);
        assert!(item.href.is_none());
        assert_eq!(item.sub_items.as_deref().map(<[_]>::len), Some(1));

        let back = serde_json::to_value(item.desktop_only()).unwrap();
        assert_eq!(back["canMobile"], false);
        assert!(back.get("href").is_none());
    }
}

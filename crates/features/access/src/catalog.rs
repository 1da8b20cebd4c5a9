use crate::error::{CatalogError, CatalogErrorExt};
use concil_kernel::domain::{MenuItem, SubMenuItem, Tag};
use std::fs;
use std::ops::Deref;
use std::path::Path;
use tracing::info;

/// Permission tags of the back-office screens.
pub mod tags {
    use concil_kernel::domain::Tag;

    pub const CLIENTS: Tag = Tag(1001);
    pub const BANKS: Tag = Tag(1003);
    pub const CARD_BRANDS: Tag = Tag(1004);
    pub const ACQUIRERS: Tag = Tag(1005);
    pub const ACCOUNTANTS: Tag = Tag(1006);
    pub const PARTNERS: Tag = Tag(1007);
    pub const USERS: Tag = Tag(1008);
    pub const PROFILES: Tag = Tag(1009);
    pub const BATCHES: Tag = Tag(1016);
    pub const SETTLEMENT: Tag = Tag(1020);
    pub const CONCILIATION: Tag = Tag(1024);
    pub const REPORTS: Tag = Tag(1030);
}

/// The static menu definition the projection filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    #[must_use]
    pub const fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Loads a definition from a JSON array of menu items.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Parse`] if it is not a valid definition.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read(path).context(format!("Reading {}", path.display()))?;
        let items: Vec<MenuItem> =
            serde_json::from_slice(&raw).context(format!("Parsing {}", path.display()))?;

        info!(path = %path.display(), entries = items.len(), "Menu catalog loaded");
        Ok(Self::new(items))
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Every distinct restricted tag referenced by the definition, in first-seen order.
    #[must_use]
    pub fn restricted_tags(&self) -> Vec<Tag> {
        let mut seen = Vec::new();
        for tag in self.items.iter().flat_map(|item| {
            std::iter::once(item.tag).chain(item.sub_items.iter().flatten().map(|sub| sub.tag))
        }) {
            if tag.is_restricted() && !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        seen
    }
}

impl Deref for MenuCatalog {
    type Target = [MenuItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// The back-office menu shipped with the application.
impl Default for MenuCatalog {
    fn default() -> Self {
        Self::new(vec![
            MenuItem::link("dashboard", "Dashboard", "/", Tag::PUBLIC),
            MenuItem::group(
                "folder",
                "Cadastros",
                Tag::PUBLIC,
                vec![
                    SubMenuItem::new("users", "Clientes", "/cadastros/clientes", tags::CLIENTS),
                    SubMenuItem::new("bank", "Bancos", "/cadastros/bancos", tags::BANKS),
                    SubMenuItem::new("credit-card", "Bandeiras", "/cadastros/bandeiras", tags::CARD_BRANDS),
                    SubMenuItem::new("terminal", "Adquirentes", "/cadastros/adquirentes", tags::ACQUIRERS),
                    SubMenuItem::new("calculator", "Contadores", "/cadastros/contadores", tags::ACCOUNTANTS),
                    SubMenuItem::new("handshake", "Parceiros", "/cadastros/parceiros", tags::PARTNERS),
                    SubMenuItem::new("user", "Usuários", "/cadastros/usuarios", tags::USERS),
                    SubMenuItem::new("shield", "Perfis", "/cadastros/perfis", tags::PROFILES),
                ],
            ),
            MenuItem::group(
                "cog",
                "Processamento",
                Tag::PUBLIC,
                vec![
                    SubMenuItem::new("layers", "Lotes", "/processamento/lotes", tags::BATCHES),
                    SubMenuItem::new("cash", "Liquidação", "/processamento/liquidacao", tags::SETTLEMENT),
                    SubMenuItem::new("check", "Conciliação", "/processamento/conciliacao", tags::CONCILIATION),
                ],
            ),
            MenuItem::link("chart", "Relatórios", "/relatorios", tags::REPORTS).desktop_only(),
        ])
    }
}

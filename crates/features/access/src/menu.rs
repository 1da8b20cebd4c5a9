use crate::device::DeviceClass;
use concil_kernel::domain::{MenuItem, SubMenuItem, User};
use concil_kernel::security::TagSet;

/// Projects the static menu onto what `user` may see on `device`.
///
/// Per entry, in order:
/// 1. Desktop-only entries are dropped on mobile, whoever the user is.
/// 2. Support users keep the entry with every sub-entry.
/// 3. Restricted entries the user does not hold are dropped.
/// 4. Sub-entries are filtered by the same tag rule; a group without a direct
///    link survives only if something is left in it.
///
/// Declared order is preserved. Projecting an already projected menu is a no-op.
#[must_use]
pub fn build_menu(definition: &[MenuItem], user: &User, device: DeviceClass) -> Vec<MenuItem> {
    let tags = TagSet::from_user(user);

    definition
        .iter()
        .filter(|item| item.can_mobile || !device.is_mobile())
        .filter_map(|item| project_item(item, user.is_support, &tags))
        .collect()
}

fn project_item(item: &MenuItem, is_support: bool, tags: &TagSet) -> Option<MenuItem> {
    if !is_support && !tags.allows(item.tag) {
        return None;
    }

    let sub_items = item.sub_items.as_ref().map(|subs| {
        subs.iter()
            .filter(|sub| is_support || tags.allows(sub.tag))
            .cloned()
            .collect::<Vec<SubMenuItem>>()
    });

    if item.href.is_none() && sub_items.as_ref().is_some_and(Vec::is_empty) {
        return None;
    }

    Some(MenuItem { sub_items, ..item.clone() })
}

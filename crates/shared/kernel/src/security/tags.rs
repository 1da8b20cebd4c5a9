use crate::domain::{Tag, User};
use fxhash::FxHashSet;

/// The set of permission tags a user holds, built once per evaluation.
///
/// Uniqueness is not required of the source list; duplicates collapse here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: FxHashSet<Tag>,
}

impl TagSet {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        user.tags().collect()
    }

    #[must_use]
    pub fn contains(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether something gated by `tag` is reachable: public tags always are,
    /// restricted ones only when held.
    #[must_use]
    pub fn allows(&self, tag: Tag) -> bool {
        !tag.is_restricted() || self.contains(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self { tags: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Permission;
    use proptest::prelude::*;

    fn user_with(tags: &[i32]) -> User {
        User {
            permissions: tags.iter().map(|&t| Permission::new(i64::from(t), "op", t)).collect(),
            ..User::default()
        }
    }

    #[test]
    fn duplicates_collapse() {
        let set = TagSet::from_user(&user_with(&[5, 5, 6]));
        assert_eq!(set.len(), 2);
        assert!(set.contains(Tag(5)));
    }

    proptest! {
        #[test]
        fn non_positive_tags_are_always_allowed(held in prop::collection::vec(any::<i32>(), 0..8), tag in i32::MIN..=0) {
            prop_assert!(TagSet::from_user(&user_with(&held)).allows(Tag(tag)));
        }

        #[test]
        fn positive_tags_require_membership(held in prop::collection::vec(1..2000i32, 0..8), tag in 1..2000i32) {
            let set = TagSet::from_user(&user_with(&held));
            prop_assert_eq!(set.allows(Tag(tag)), held.contains(&tag));
        }
    }
}

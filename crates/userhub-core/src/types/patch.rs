//! Per-field tri-state used by partial updates.
//!
//! A [`Patch`] separates "the caller said nothing about this field" from
//! "the caller asked for the field to be emptied", which a plain
//! `Option<T>` cannot express.

/// One field of a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Leave the stored value as it is.
    #[default]
    Unchanged,
    /// Replace the stored value.
    Set(T),
    /// Remove the stored value. Only meaningful for optional attributes.
    Clear,
}

impl<T> Patch<T> {
    /// Builds a patch from an optional value: `Some` sets, `None` leaves unchanged.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Unchanged,
        }
    }

    /// Returns `true` when the field is left untouched.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Returns the new value, if one is being set.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            _ => None,
        }
    }

    /// Maps the carried value, preserving `Unchanged` and `Clear`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Unchanged => Patch::Unchanged,
            Self::Set(v) => Patch::Set(f(v)),
            Self::Clear => Patch::Clear,
        }
    }

    /// Applies this patch to an optional stored value.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::Set(v) => Some(v),
            Self::Clear => None,
        }
    }
}

impl Patch<String> {
    /// Builds a patch from wire input where empty means "not provided".
    pub fn from_text(value: Option<String>) -> Self {
        Self::from_option(value.filter(|v| !v.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_treats_empty_as_unchanged() {
        assert_eq!(Patch::from_text(None), Patch::Unchanged);
        assert_eq!(Patch::from_text(Some(String::new())), Patch::Unchanged);
        assert_eq!(
            Patch::from_text(Some("north".to_string())),
            Patch::Set("north".to_string())
        );
    }

    #[test]
    fn test_apply_to() {
        let current = Some("north".to_string());
        assert_eq!(Patch::Unchanged.apply_to(current.clone()), current);
        assert_eq!(Patch::Clear.apply_to(current.clone()), None);
        assert_eq!(
            Patch::Set("south".to_string()).apply_to(current),
            Some("south".to_string())
        );
    }

    #[test]
    fn test_map_preserves_state() {
        let clear: Patch<u8> = Patch::Clear;
        assert_eq!(clear.map(|v| v + 1), Patch::Clear);
        assert_eq!(Patch::Set(1u8).map(|v| v + 1), Patch::Set(2));
    }
}

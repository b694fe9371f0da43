use alloc::string::String;

use om_utils::IndexSet;

/// The options bundle of one normalize or denormalize call.
///
/// Every option is optional, so per-call options can be layered over the
/// engine defaults with [`merged_over`](Self::merged_over).
///
/// # Examples
///
/// ```
/// use om_mapper::MapOptions;
///
/// let defaults = MapOptions::new().with_allowed_groups(["public"]);
/// let call = MapOptions::new().with_collapse_relationships_to_identifiers(true);
///
/// let merged = call.merged_over(&defaults);
/// assert!(merged.collapses_relationships_to_identifiers());
/// assert!(merged.is_group_allowed("public"));
/// assert!(!merged.is_group_allowed("admin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapOptions {
    collapse_relationships_to_identifiers: Option<bool>,
    allowed_groups: Option<IndexSet<String>>,
    ignored_attributes: Option<IndexSet<String>>,
}

impl MapOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables form mode: related objects collapse to their identifiers.
    #[inline]
    pub fn with_collapse_relationships_to_identifiers(mut self, enabled: bool) -> Self {
        self.collapse_relationships_to_identifiers = Some(enabled);
        self
    }

    /// Restricts attributes to those carrying one of `groups`.
    pub fn with_allowed_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Excludes the named attributes.
    pub fn with_ignored_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Fills every option left unset here from `defaults`.
    pub fn merged_over(&self, defaults: &Self) -> Self {
        Self {
            collapse_relationships_to_identifiers: self
                .collapse_relationships_to_identifiers
                .or(defaults.collapse_relationships_to_identifiers),
            allowed_groups: self
                .allowed_groups
                .clone()
                .or_else(|| defaults.allowed_groups.clone()),
            ignored_attributes: self
                .ignored_attributes
                .clone()
                .or_else(|| defaults.ignored_attributes.clone()),
        }
    }

    /// Returns `true` in form mode.
    #[inline]
    pub fn collapses_relationships_to_identifiers(&self) -> bool {
        self.collapse_relationships_to_identifiers.unwrap_or(false)
    }

    /// Returns the allowed groups; empty means every attribute is allowed.
    pub fn allowed_groups(&self) -> impl Iterator<Item = &str> {
        self.allowed_groups.iter().flatten().map(String::as_str)
    }

    /// Returns `true` if group filtering is active.
    #[inline]
    pub fn has_allowed_groups(&self) -> bool {
        self.allowed_groups.as_ref().is_some_and(|groups| !groups.is_empty())
    }

    /// Returns `true` if `group` is allowed; without groups every group is.
    pub fn is_group_allowed(&self, group: &str) -> bool {
        !self.has_allowed_groups()
            || self
                .allowed_groups
                .as_ref()
                .is_some_and(|groups| groups.contains(group))
    }

    /// Returns `true` if `attribute` is explicitly ignored.
    pub fn is_ignored(&self, attribute: &str) -> bool {
        self.ignored_attributes
            .as_ref()
            .is_some_and(|ignored| ignored.contains(attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::MapOptions;

    #[test]
    fn per_call_options_win() {
        let defaults = MapOptions::new()
            .with_collapse_relationships_to_identifiers(true)
            .with_ignored_attributes(["password"]);
        let call = MapOptions::new().with_collapse_relationships_to_identifiers(false);

        let merged = call.merged_over(&defaults);
        assert!(!merged.collapses_relationships_to_identifiers());
        assert!(merged.is_ignored("password"));
        assert!(!merged.is_ignored("name"));
    }

    #[test]
    fn empty_groups_allow_everything() {
        let options = MapOptions::new().with_allowed_groups(Vec::<String>::new());
        assert!(!options.has_allowed_groups());
        assert!(options.is_group_allowed("anything"));
        assert_eq!(options.allowed_groups().count(), 0);
    }
}

use std::cmp::Ordering;

use crate::components::{
    ComponentDescriptor, PriorityItem, MAX_COMPONENT_NAME_LEN, MAX_TYPE_NAME_LEN,
};

// `Ordering::Less` means "sorts first", i.e. preferred. All comparisons are
// therefore inverted: higher priorities, later names and newer versions come first.

#[inline]
fn truncated(name: &str, max_len: usize) -> &[u8] {
    let bytes = name.as_bytes();
    &bytes[..bytes.len().min(max_len)]
}

fn compare_names(a: &ComponentDescriptor, b: &ComponentDescriptor) -> Ordering {
    truncated(&b.type_name, MAX_TYPE_NAME_LEN)
        .cmp(truncated(&a.type_name, MAX_TYPE_NAME_LEN))
        .then_with(|| {
            truncated(&b.component_name, MAX_COMPONENT_NAME_LEN)
                .cmp(truncated(&a.component_name, MAX_COMPONENT_NAME_LEN))
        })
}

/// Total order over components: type name, component name, then major, minor and
/// release version, newest first.
pub fn compare(a: &ComponentDescriptor, b: &ComponentDescriptor) -> Ordering {
    compatible(a, b).then_with(|| b.release.cmp(&a.release))
}

/// Like [`compare`] but blind to the release version.
pub fn compatible(a: &ComponentDescriptor, b: &ComponentDescriptor) -> Ordering {
    compare_names(a, b)
        .then_with(|| b.major.cmp(&a.major))
        .then_with(|| b.minor.cmp(&a.minor))
}

/// Two components are compatible when they only differ in their release version.
pub fn is_compatible(a: &ComponentDescriptor, b: &ComponentDescriptor) -> bool {
    compatible(a, b) == Ordering::Equal
}

/// Highest priority first, ties broken by [`compare`].
pub fn compare_priority(a: &PriorityItem, b: &PriorityItem) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| compare(&a.component, &b.component))
}

impl PartialEq for ComponentDescriptor {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for ComponentDescriptor {}

impl PartialOrd for ComponentDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialEq for PriorityItem {
    fn eq(&self, other: &Self) -> bool {
        compare_priority(self, other) == Ordering::Equal
    }
}

impl Eq for PriorityItem {}

impl PartialOrd for PriorityItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityItem {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_priority(self, other)
    }
}

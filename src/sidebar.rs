//! Sidebar tree construction.
//!
//! Turns the flat manifest into the nested section/item structure the
//! navigation renders. This is a pure function from a list to a list —
//! no I/O, no failure conditions.
//!
//! ## Algorithm
//!
//! 1. Group records by `section`, preserving manifest order within each
//!    group as the input to the sort.
//! 2. Per section:
//!    - Pull out the section's own index record (slug == section name).
//!      It supplies the section title/icon/order and never appears as a
//!      navigable item.
//!    - Sort the remaining records by `(order, title)` — stable two-key
//!      sort, title comparison case-sensitive.
//!    - Create one item per record up front, then link: records whose
//!      parent is absent, equals the section, or names a slug with no item
//!      in this section land at the section root. Everything else attaches
//!      to its parent's children.
//! 3. Sort the sections themselves by their index record's order.
//!
//! A dangling parent reference places the item at the section root instead
//! of dropping it — a document must never silently vanish from navigation.
//!
//! Parent slugs are path prefixes of their children, so the link graph is
//! acyclic and assembly recursion is bounded by path depth.

use crate::types::{DocumentRecord, SidebarItem, SidebarSection, DEFAULT_ORDER};
use std::collections::HashMap;

/// Build the ordered sidebar sections from the manifest's records.
pub fn build_sidebar(docs: &[DocumentRecord]) -> Vec<SidebarSection> {
    let mut section_names: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&DocumentRecord>> = HashMap::new();

    for doc in docs {
        let group = groups.entry(doc.section.as_str()).or_default();
        if group.is_empty() {
            section_names.push(doc.section.as_str());
        }
        group.push(doc);
    }

    let mut sections: Vec<SidebarSection> = section_names
        .into_iter()
        .map(|name| build_section(name, groups.remove(name).unwrap_or_default()))
        .collect();

    // Stable sort keeps first-seen order for sections with equal order.
    sections.sort_by_key(|s| s.order);
    sections
}

fn build_section(name: &str, mut group: Vec<&DocumentRecord>) -> SidebarSection {
    let index_record = group
        .iter()
        .position(|d| d.slug == name)
        .map(|pos| group.remove(pos));

    group.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));

    // Pass 1: one item per record, children deferred.
    let mut slots: Vec<Option<SidebarItem>> = group
        .iter()
        .map(|doc| {
            Some(SidebarItem {
                title: doc.title.clone(),
                slug: doc.slug.clone(),
                path: doc.path.clone(),
                icon: doc.icon,
                badge: doc.badge.clone(),
                children: None,
            })
        })
        .collect();

    let slot_of: HashMap<&str, usize> = group
        .iter()
        .enumerate()
        .map(|(i, doc)| (doc.slug.as_str(), i))
        .collect();

    // Pass 2: resolve each record to the root list or its parent's children.
    // Item creation happened up front, so link order cannot matter.
    let mut roots: Vec<usize> = Vec::new();
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); group.len()];

    for (i, doc) in group.iter().enumerate() {
        match doc.parent.as_deref() {
            None => roots.push(i),
            Some(parent) if parent == name => roots.push(i),
            Some(parent) => match slot_of.get(parent) {
                Some(&parent_slot) => children_of[parent_slot].push(i),
                // Dangling parent: keep the document visible at the root.
                None => roots.push(i),
            },
        }
    }

    let items = roots
        .iter()
        .map(|&i| assemble(i, &mut slots, &children_of))
        .collect();

    let (title, icon, order) = match index_record {
        Some(doc) => (doc.title.clone(), doc.icon, doc.order),
        None => (capitalize(name), None, DEFAULT_ORDER),
    };

    SidebarSection {
        section: name.to_string(),
        title,
        icon,
        order,
        items,
    }
}

/// Move an item out of its slot, attaching its (already sorted) children.
/// Empty child lists stay `None` so the key is absent from serialized output.
fn assemble(
    slot: usize,
    slots: &mut [Option<SidebarItem>],
    children_of: &[Vec<usize>],
) -> SidebarItem {
    let mut item = slots[slot].take().expect("each slot assembled exactly once");
    let children: Vec<SidebarItem> = children_of[slot]
        .iter()
        .map(|&child| assemble(child, slots, children_of))
        .collect();
    if !children.is_empty() {
        item.children = Some(children);
    }
    item
}

/// Fallback section title: the slug with its first character uppercased.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

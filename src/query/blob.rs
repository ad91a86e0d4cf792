//! Searchable blob — the derived, normalised text representation of a guest.
//!
//! The blob is what the default substring rule (and the single-letter rule)
//! searches. It is a deterministic pure function of (guest, resolved node
//! name): lower-cased, space-joined name, id, status, type keywords, node
//! identifiers, role keywords, and tag tokens.

use pulse_core::{Guest, GuestType, Role};

/// Build the searchable text for one guest.
///
/// `node_name` is the already-resolved display name of the guest's node
/// (fall back to the raw id happens in [`pulse_core::resolve_node_name`]).
pub fn searchable_blob(guest: &Guest, node_name: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(16);
    let vmid = guest.vmid.as_str();

    parts.push(&guest.name);
    parts.push(vmid);
    parts.push(&guest.status);

    match guest.guest_type {
        GuestType::Qemu => parts.extend(["vm", "virtual", "machine"]),
        GuestType::Lxc => parts.extend(["ct", "container"]),
    }

    parts.push(&guest.node);
    parts.push(node_name);

    if guest.shared {
        parts.extend(["shared", "role"]);
        match guest.role() {
            Role::Primary => parts.push("primary"),
            Role::Secondary => parts.push("secondary"),
            Role::Unshared => {}
        }
    } else {
        parts.push("none");
    }

    for token in guest.tag_tokens() {
        parts.push(token);
    }
    if let Some(tags) = guest.tags.as_deref() {
        parts.push(tags);
    }

    parts.join(" ").to_lowercase()
}

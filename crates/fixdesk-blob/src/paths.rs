// SPDX-FileCopyrightText: 2026 Fixdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object path codec for the storage REST surface.
//!
//! Object paths appear as a single URL path segment with `/` percent-encoded
//! (`complaints%2F42_x.jpg`). Paths produced by this system are restricted
//! to `[A-Za-z0-9_./-]`, so the codec only has to handle the slash.

/// Encodes an object path for use as one URL path segment.
pub fn encode_object_path(path: &str) -> String {
    path.replace('/', "%2F")
}

/// Decodes a percent-encoded object path segment.
pub fn decode_object_path(segment: &str) -> String {
    segment.replace("%2F", "/").replace("%2f", "/")
}

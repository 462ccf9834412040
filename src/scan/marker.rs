// src/scan/marker.rs

//! Recognition of `-----BEGIN label-----` / `-----END label-----` lines.
//!
//! A marker line is the literal prefix (`-----BEGIN ` or `-----END `, the
//! keyword and one separating space), a non-empty run of non-`-` bytes of at
//! most [`MAX_LABEL_LEN`] bytes, and the literal `-----` suffix. The label is
//! everything after that single space, so further spaces belong to it:
//! `-----BEGIN  CERT-----` carries the label ` CERT`. Whatever follows the
//! suffix (usually the line ending) is ignored. Labels are compared
//! byte-for-byte.

/// Longest label accepted in a marker line.
pub const MAX_LABEL_LEN: usize = 1000;

const DASHES: &[u8] = b"-----";
const BEGIN: &[u8] = b"BEGIN ";
const END: &[u8] = b"END ";

/// Which side of an armoured block a marker line opens or closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Begin,
    End,
}

impl MarkerKind {
    fn keyword(self) -> &'static [u8] {
        match self {
            MarkerKind::Begin => BEGIN,
            MarkerKind::End => END,
        }
    }
}

/// Extract the label from a BEGIN line, if `line` is one.
pub fn begin_label(line: &[u8]) -> Option<&[u8]> {
    marker_label(line, MarkerKind::Begin)
}

/// Extract the label from an END line, if `line` is one.
pub fn end_label(line: &[u8]) -> Option<&[u8]> {
    marker_label(line, MarkerKind::End)
}

pub fn marker_label(line: &[u8], kind: MarkerKind) -> Option<&[u8]> {
    let rest = line.strip_prefix(DASHES)?.strip_prefix(kind.keyword())?;

    let len = rest.iter().position(|&b| b == b'-').unwrap_or(rest.len());
    if len == 0 || len > MAX_LABEL_LEN {
        return None;
    }

    let (label, tail) = rest.split_at(len);
    tail.starts_with(DASHES).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_line_yields_label() {
        assert_eq!(
            begin_label(b"-----BEGIN CERTIFICATE-----\n"),
            Some(&b"CERTIFICATE"[..])
        );
        assert_eq!(
            begin_label(b"-----BEGIN PGP SIGNATURE-----"),
            Some(&b"PGP SIGNATURE"[..])
        );
    }

    #[test]
    fn end_line_yields_label() {
        assert_eq!(
            end_label(b"-----END CERTIFICATE-----\r\n"),
            Some(&b"CERTIFICATE"[..])
        );
    }

    #[test]
    fn kinds_do_not_cross_match() {
        assert_eq!(begin_label(b"-----END CERTIFICATE-----\n"), None);
        assert_eq!(end_label(b"-----BEGIN CERTIFICATE-----\n"), None);
    }

    #[test]
    fn rejects_malformed_markers() {
        // missing trailing dashes
        assert_eq!(begin_label(b"-----BEGIN CERTIFICATE\n"), None);
        // trailing dashes too short
        assert_eq!(begin_label(b"-----BEGIN CERTIFICATE----\n"), None);
        // empty label
        assert_eq!(begin_label(b"-----BEGIN -----\n"), None);
        // no separating space
        assert_eq!(begin_label(b"-----BEGINCERT-----\n"), None);
        // leading text
        assert_eq!(begin_label(b" -----BEGIN CERT-----\n"), None);
        // lowercase keyword
        assert_eq!(begin_label(b"-----begin CERT-----\n"), None);
        assert_eq!(begin_label(b"MIIB...\n"), None);
        assert_eq!(begin_label(b""), None);
    }

    #[test]
    fn text_after_closing_dashes_is_ignored() {
        assert_eq!(begin_label(b"-----BEGIN X----- trailing\n"), Some(&b"X"[..]));
        assert_eq!(begin_label(b"-----BEGIN X------\n"), Some(&b"X"[..]));
    }

    #[test]
    fn label_length_is_capped() {
        let mut line = b"-----BEGIN ".to_vec();
        line.extend(std::iter::repeat_n(b'A', MAX_LABEL_LEN));
        line.extend_from_slice(b"-----\n");
        assert_eq!(begin_label(&line).map(<[u8]>::len), Some(MAX_LABEL_LEN));

        let mut line = b"-----BEGIN ".to_vec();
        line.extend(std::iter::repeat_n(b'A', MAX_LABEL_LEN + 1));
        line.extend_from_slice(b"-----\n");
        assert_eq!(begin_label(&line), None);
    }

    #[test]
    fn extra_spaces_are_part_of_the_label() {
        assert_eq!(begin_label(b"-----BEGIN  CERT-----\n"), Some(&b" CERT"[..]));
        assert_eq!(end_label(b"-----END  CERT-----\n"), Some(&b" CERT"[..]));
        assert_ne!(end_label(b"-----END CERT-----\n"), Some(&b" CERT"[..]));
        assert_eq!(begin_label(b"-----BEGIN CERT -----\n"), Some(&b"CERT "[..]));
    }

    #[test]
    fn labels_are_raw_bytes() {
        assert_eq!(
            begin_label(b"-----BEGIN caf\xc3\xa9 \xff-----\n"),
            Some(&b"caf\xc3\xa9 \xff"[..])
        );
    }
}

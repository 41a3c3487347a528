//! XML name character classes
//!
//! Element and attribute names are scanned as `NCName (':' NCName)?`.
//! The colon is never part of a name start, so `prefix:local` splits cleanly.

/// Which character grammar the scanner accepts for names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSyntax {
    /// XML 1.0 (Fifth Edition) Name production, minus the colon
    #[default]
    Xml,
    /// ASCII letters and underscore to start, plus `.`, `-`, digits to continue.
    /// Any non-ASCII character is accepted in both positions.
    Ascii,
}

impl NameSyntax {
    /// Check if a character may start a name
    #[inline]
    pub fn is_start(self, c: char) -> bool {
        match self {
            NameSyntax::Xml => is_name_start_char(c),
            NameSyntax::Ascii => c.is_ascii_alphabetic() || c == '_' || !c.is_ascii(),
        }
    }

    /// Check if a character may continue a name
    #[inline]
    pub fn is_continue(self, c: char) -> bool {
        match self {
            NameSyntax::Xml => is_name_char(c),
            NameSyntax::Ascii => {
                c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') || !c.is_ascii()
            }
        }
    }
}

/// NameStartChar per XML 1.0, excluding ':'
#[inline]
pub fn is_name_start_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphabetic() || c == '_';
    }
    matches!(c,
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}' |
        '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}'
    )
}

/// NameChar per XML 1.0, excluding ':'
#[inline]
pub fn is_name_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
    }
    is_name_start_char(c)
        || c == '\u{B7}'
        || matches!(c, '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Split a name into prefix and local name at the colon
pub fn split_name(name: &str) -> (Option<&str>, &str) {
    match memchr::memchr(b':', name.as_bytes()) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_start_chars() {
        let xml = NameSyntax::Xml;
        assert!(xml.is_start('a'));
        assert!(xml.is_start('Z'));
        assert!(xml.is_start('_'));
        assert!(xml.is_start('é'));
        assert!(xml.is_start('日'));
        assert!(!xml.is_start('1'));
        assert!(!xml.is_start('-'));
        assert!(!xml.is_start(':'));
        assert!(!xml.is_start('@'));
        assert!(!xml.is_start('\u{D7}'));
    }

    #[test]
    fn test_xml_continue_chars() {
        let xml = NameSyntax::Xml;
        assert!(xml.is_continue('9'));
        assert!(xml.is_continue('-'));
        assert!(xml.is_continue('.'));
        assert!(xml.is_continue('\u{B7}'));
        assert!(xml.is_continue('\u{301}'));
        assert!(!xml.is_continue('@'));
        assert!(!xml.is_continue(' '));
        assert!(!xml.is_continue(':'));
    }

    #[test]
    fn test_ascii_accepts_any_non_ascii() {
        let ascii = NameSyntax::Ascii;
        assert!(ascii.is_start('\u{D7}'));
        assert!(ascii.is_continue('\u{2028}'));
        assert!(!ascii.is_start('9'));
        assert!(!ascii.is_continue('@'));
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("svg:rect"), (Some("svg"), "rect"));
        assert_eq!(split_name("rect"), (None, "rect"));
    }
}

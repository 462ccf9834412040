#![allow(dead_code)]

/// Builder for armoured input text to simplify test setup.
#[derive(Debug, Default, Clone)]
pub struct ArmourBuilder {
    text: String,
}

impl ArmourBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free text outside any block.
    pub fn text(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// A complete block with matching BEGIN/END labels.
    pub fn block(self, label: &str, body: &str) -> Self {
        self.mismatched_block(label, label, body)
    }

    /// A block whose END label may differ from its BEGIN label.
    pub fn mismatched_block(mut self, begin: &str, end: &str, body: &str) -> Self {
        self.text.push_str(&begin_line(begin));
        for line in body.lines() {
            self.text.push_str(line);
            self.text.push('\n');
        }
        self.text.push_str(&end_line(end));
        self
    }

    /// A BEGIN marker and body with no END marker.
    pub fn unterminated(mut self, label: &str, body: &str) -> Self {
        self.text.push_str(&begin_line(label));
        for line in body.lines() {
            self.text.push_str(line);
            self.text.push('\n');
        }
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}

pub fn begin_line(label: &str) -> String {
    format!("-----BEGIN {label}-----\n")
}

pub fn end_line(label: &str) -> String {
    format!("-----END {label}-----\n")
}

/// `n` certificate blocks separated by a line of chatter.
pub fn certificate_chain(n: usize) -> String {
    (0..n)
        .fold(ArmourBuilder::new(), |b, i| {
            b.text(&format!("subject=CN=cert{i}"))
                .block("CERTIFICATE", &format!("MIIBcert{i}\nQUJD"))
        })
        .build()
}

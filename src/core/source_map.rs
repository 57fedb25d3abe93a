//! Source Map v3 output for transforms that keep the code unchanged.

use serde::Serialize;

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub sources: Vec<String>,
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// A map where every character of `code` maps onto itself in `source_id`.
    ///
    /// Columns count UTF-16 code units, as source map consumers expect.
    pub fn identity(code: &str, source_id: &str) -> Self {
        Self {
            version: 3,
            sources: vec![source_id.to_string()],
            sources_content: vec![code.to_string()],
            names: Vec::new(),
            mappings: identity_mappings(code),
        }
    }
}

fn identity_mappings(code: &str) -> String {
    let mut mappings = String::with_capacity(code.len() * 5);
    let mut prev_source_line: i64 = 0;
    let mut prev_source_col: i64 = 0;

    for (line_no, line) in code.split('\n').enumerate() {
        if line_no > 0 {
            mappings.push(';');
        }

        let mut prev_generated_col: i64 = 0;
        let mut col: i64 = 0;
        for (i, c) in line.chars().enumerate() {
            if i > 0 {
                mappings.push(',');
            }
            encode_vlq(&mut mappings, col - prev_generated_col);
            encode_vlq(&mut mappings, 0);
            encode_vlq(&mut mappings, line_no as i64 - prev_source_line);
            encode_vlq(&mut mappings, col - prev_source_col);

            prev_generated_col = col;
            prev_source_line = line_no as i64;
            prev_source_col = col;
            col += c.len_utf16() as i64;
        }
    }

    mappings
}

fn encode_vlq(out: &mut String, value: i64) {
    let mut vlq = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };

    loop {
        let mut digit = vlq & 0b1_1111;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b10_0000;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

use crate::libs::transcript::Strand;

/// One minimap2-style PAF alignment record: twelve mandatory tab-delimited
/// columns followed by `key:type:value` auxiliary tags.
#[derive(Debug, Clone, Default)]
pub struct PafRecord {
    pub q_name: String,
    pub q_size: i32,
    pub q_start: i32,
    pub q_end: i32,
    pub strand: char,
    pub t_name: String,
    pub t_size: i32,
    pub t_start: i32,
    pub t_end: i32,
    pub match_count: i32,
    pub block_len: i32,
    pub mapq: i32,
    pub tags: Vec<String>,
}

impl std::str::FromStr for PafRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('\t').collect();
        if fields.len() < 12 {
            return Err(anyhow::anyhow!("Invalid PAF line: fewer than 12 columns"));
        }

        let parse_i32 = |s: &str| {
            s.parse::<i32>()
                .map_err(|_| anyhow::anyhow!("Invalid i32: {}", s))
        };

        Ok(PafRecord {
            q_name: fields[0].to_string(),
            q_size: parse_i32(fields[1])?,
            q_start: parse_i32(fields[2])?,
            q_end: parse_i32(fields[3])?,
            strand: fields[4].chars().next().unwrap_or('.'),
            t_name: fields[5].to_string(),
            t_size: parse_i32(fields[6])?,
            t_start: parse_i32(fields[7])?,
            t_end: parse_i32(fields[8])?,
            match_count: parse_i32(fields[9])?,
            block_len: parse_i32(fields[10])?,
            mapq: parse_i32(fields[11])?,
            tags: fields[12..].iter().map(|f| f.to_string()).collect(),
        })
    }
}

impl PafRecord {
    /// Value of the first `key:kind:value` tag matching `key` and `kind`.
    pub fn tag_value(&self, key: &str, kind: char) -> Option<&str> {
        self.tags.iter().find_map(|tag| {
            let mut parts = tag.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(k), Some(t), Some(v)) if k == key && t.len() == 1 => {
                    if t.chars().next() == Some(kind) {
                        Some(v)
                    } else {
                        None
                    }
                }
                _ => None,
            }
        })
    }

    /// A record counts as primary only when carrying `tp:A:P`.
    pub fn is_primary(&self) -> bool {
        self.tag_value("tp", 'A') == Some("P")
    }

    pub fn cigar(&self) -> Option<&str> {
        self.tag_value("cg", 'Z')
    }

    /// Transcription strand: the `ts:A:` tag when it carries `+` or `-`,
    /// otherwise the alignment's own strand column.
    pub fn trans_strand(&self) -> Strand {
        match self.tag_value("ts", 'A') {
            Some("+") => Strand::Forward,
            Some("-") => Strand::Reverse,
            _ => Strand::from_char(self.strand),
        }
    }

    /// Matched bases over the aligned query span.
    pub fn calc_ident(&self) -> f32 {
        let span = self.q_end - self.q_start;
        if span <= 0 {
            0.0
        } else {
            self.match_count as f32 / span as f32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    pub len: i32,
    pub op: u8,
}

/// Split a CIGAR string into its length-tagged operations.
pub fn parse_cigar(cigar: &str) -> Vec<CigarOp> {
    let mut ops = Vec::new();
    let mut len = 0i32;
    for &b in cigar.as_bytes() {
        if b.is_ascii_digit() {
            len = len * 10 + (b - b'0') as i32;
        } else {
            ops.push(CigarOp { len, op: b });
            len = 0;
        }
    }
    ops
}

/// Any single insertion or deletion run of `threshold` bases or more marks
/// the alignment as an artifact.
pub fn max_indel_ok(ops: &[CigarOp], threshold: i32) -> bool {
    !ops.iter()
        .any(|c| matches!(c.op, b'I' | b'D') && c.len >= threshold)
}

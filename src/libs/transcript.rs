use std::cmp::Ordering;
use std::fmt;

/// A 1-based inclusive interval on the target sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Exon {
    pub start: i32,
    pub end: i32,
}

impl Exon {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => Strand::Forward,
            '-' => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unknown => '.',
        };
        write!(f, "{}", c)
    }
}

/// Verdict of testing one transcript against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Contained,
    NotContained,
    LastExonLonger,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    /// Source prefix, kept separately so gene ids can be scoped per source.
    pub prefix: String,
    pub strand: Strand,
    pub chromosome: String,
    /// Running bounds over all exons. `start` only ever decreases and `end`
    /// only ever increases as exons are added.
    pub start: i32,
    pub end: i32,
    pub num_matching: i32,
    pub gene_id: Option<String>,
    pub exons: Vec<Exon>,
}

impl Transcript {
    pub fn new(id: &str, strand: Strand, chromosome: &str, num_matching: i32, prefix: &str) -> Self {
        Self {
            id: format!("{}{}", prefix, id),
            prefix: prefix.to_string(),
            strand,
            chromosome: chromosome.to_string(),
            start: i32::MAX,
            end: 0,
            num_matching,
            gene_id: None,
            exons: Vec::new(),
        }
    }

    /// Append an exon, keeping the exon list sorted ascending by start and
    /// the running bounds up to date.
    pub fn add_exon(&mut self, start: i32, end: i32) {
        self.start = self.start.min(start);
        self.end = self.end.max(end);
        self.exons.push(Exon::new(start, end));
        self.exons.sort_by_key(|e| e.start);
    }

    pub fn has_an_exon(&self) -> bool {
        !self.exons.is_empty()
    }

    /// Composite positional order used before clustering: chromosome, then
    /// strand (strand-specific mode only), then start ascending, then end
    /// descending. The descending end tie-break puts the longest transcript
    /// first among those sharing a start, so the clustering sweep tests
    /// shorter transcripts against the established gene boundary.
    pub fn cmp_positional(&self, other: &Self, strand_specific: bool) -> Ordering {
        let mut ord = self.chromosome.cmp(&other.chromosome);
        if strand_specific {
            ord = ord.then(self.strand.cmp(&other.strand));
        }
        ord.then(self.start.cmp(&other.start))
            .then(other.end.cmp(&self.end))
    }

    /// Tests whether this transcript is structurally contained in `other`.
    ///
    /// All of this transcript's exons must match consecutive exons of
    /// `other` at exact splice junctions, except that the first exon may
    /// start up to `threshold` bases before its counterpart and the last
    /// exon may end up to `threshold` bases after its counterpart. A last
    /// exon overshooting that tolerance while its start still matches is
    /// reported as `LastExonLonger`.
    pub fn is_contained_in(&self, other: &Transcript, threshold: i32) -> Containment {
        if other.exons.len() == 1 {
            return self.is_contained_in_one_exon(other, threshold);
        }
        let offset = match self.first_match_index(other, threshold) {
            Some(i) => i,
            None => return Containment::NotContained,
        };
        let last = self.exons.len() - 1;

        // Middle exons must match exactly at the anchored offset.
        for i in 1..last {
            match other.exons.get(i + offset) {
                Some(e) if *e == self.exons[i] => {}
                _ => return Containment::NotContained,
            }
        }

        match other.exons.get(last + offset) {
            Some(e) if e.start == self.exons[last].start => {
                if self.exons[last].end <= e.end + threshold {
                    Containment::Contained
                } else {
                    Containment::LastExonLonger
                }
            }
            _ => Containment::NotContained,
        }
    }

    fn is_contained_in_one_exon(&self, other: &Transcript, threshold: i32) -> Containment {
        if self.exons.len() != 1 {
            return Containment::NotContained;
        }
        let exon = self.exons[0];
        let other_exon = other.exons[0];
        if exon.start < other_exon.start - threshold {
            return Containment::NotContained;
        }
        if exon.end <= other_exon.end + threshold {
            Containment::Contained
        } else {
            Containment::LastExonLonger
        }
    }

    /// Index of the first exon of `other` that anchors this transcript's
    /// first exon: same end coordinate, start within `threshold` overhang.
    fn first_match_index(&self, other: &Transcript, threshold: i32) -> Option<usize> {
        let first = self.exons.first()?;
        other
            .exons
            .iter()
            .position(|e| first.start >= e.start - threshold && first.end == e.end)
    }
}

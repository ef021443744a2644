use xxhash_rust::xxh3::Xxh3;

use crate::emit::factory::SourceLayout;

const XXH3_SEED: u64 = 0x5c3e_9a1d_07b4_f26b;

/// What an [`OutputUnit`] contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Helper definitions.
    Preamble,
    /// One node's construction routine.
    Factory,
    /// Controller materialization and controller-side starts.
    DeferredBind,
    /// Constructor and root accessors.
    Entry,
}

impl UnitKind {
    fn tag(self) -> u8 {
        match self {
            Self::Preamble => 0,
            Self::Factory => 1,
            Self::DeferredBind => 2,
            Self::Entry => 3,
        }
    }
}

/// One immutable fragment of generated text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputUnit {
    /// Unit kind.
    pub kind: UnitKind,
    /// Routine name for factories, a fixed label otherwise.
    pub name: String,
    /// Generated text, newline-terminated.
    pub text: String,
}

/// Stable 128-bit digest of generated output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Header and source artifacts ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackagedSource {
    /// `<Class>.h`
    pub header_name: String,
    /// Header text.
    pub header: String,
    /// `<Class>.cpp`
    pub source_name: String,
    /// Source text.
    pub source: String,
}

/// Result of one generation pass: ordered units plus the layout that wraps them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSource {
    /// Generated class name.
    pub class_name: String,
    /// Preamble, factories in emission order, deferred bind, entry.
    pub units: Vec<OutputUnit>,
    /// Header and the text around the units.
    pub layout: SourceLayout,
}

impl GeneratedSource {
    /// Units of one kind, in order.
    pub fn units_of(&self, kind: UnitKind) -> impl Iterator<Item = &OutputUnit> {
        self.units.iter().filter(move |u| u.kind == kind)
    }

    /// Factory unit for the routine `name`.
    pub fn factory(&self, name: &str) -> Option<&OutputUnit> {
        self.units_of(UnitKind::Factory).find(|u| u.name == name)
    }

    /// All units, separated by blank lines.
    pub fn concat(&self) -> String {
        let mut s = String::new();
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                s.push('\n');
            }
            s.push_str(&unit.text);
        }
        s
    }

    /// Header plus the source with every unit placed inside the class body.
    pub fn package(&self) -> PackagedSource {
        let mut source = self.layout.prologue.clone();
        source.push_str(&indent(&self.concat(), self.layout.body_depth));
        source.push_str(&self.layout.epilogue);
        PackagedSource {
            header_name: format!("{}.h", self.class_name),
            header: self.layout.header.clone(),
            source_name: format!("{}.cpp", self.class_name),
            source,
        }
    }

    /// Digest of the units and layout; equal for byte-identical output.
    pub fn fingerprint(&self) -> SourceFingerprint {
        let mut h = Xxh3::with_seed(XXH3_SEED);
        h.update(&(self.units.len() as u64).to_le_bytes());
        for unit in &self.units {
            h.update(&[unit.kind.tag()]);
            write_str(&mut h, &unit.name);
            write_str(&mut h, &unit.text);
        }
        write_str(&mut h, &self.layout.header);
        write_str(&mut h, &self.layout.prologue);
        write_str(&mut h, &self.layout.epilogue);
        h.update(&(self.layout.body_depth as u64).to_le_bytes());
        let v = h.digest128();
        SourceFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_str(h: &mut Xxh3, s: &str) {
    h.update(&(s.len() as u64).to_le_bytes());
    h.update(s.as_bytes());
}

fn indent(text: &str, depth: usize) -> String {
    let pad = "    ".repeat(depth);
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/generate/output.rs"]
mod tests;

//! Declarative audio mix-graph construction.
//!
//! The engine's mix operation averages its N inputs, attenuating overall
//! loudness by a factor of N; every graph built here therefore appends a
//! gain multiplier equal to the input count right after the mix. The mix
//! duration policy is "match the first input", so trailing audio beyond
//! the base stream is truncated, never extending it.

/// Builds the filter graph that mixes one base stream with any number of
/// delayed or volume-scaled branches.
///
/// Used by the dub assembler (silent base + delayed segment branches) and
/// by the final render spec (main/dub track + background music branch).
#[derive(Debug, Clone)]
pub struct MixBuilder {
    base_label: String,
    statements: Vec<String>,
    branch_labels: Vec<String>,
}

impl MixBuilder {
    /// Start a graph over the given base stream label (e.g. `[0:a]`).
    ///
    /// The base is the mix's first input and defines the output duration.
    pub fn new(base_label: impl Into<String>) -> Self {
        Self {
            base_label: base_label.into(),
            statements: Vec::new(),
            branch_labels: Vec::new(),
        }
    }

    /// Add a branch for input `input_index`, delayed by `delay_ms`
    /// milliseconds on both channels.
    pub fn add_delayed(&mut self, input_index: usize, delay_ms: u64) -> &mut Self {
        let label = format!("a{}", input_index);
        self.statements.push(format!(
            "[{}:a]adelay={}|{}[{}]",
            input_index, delay_ms, delay_ms, label
        ));
        self.branch_labels.push(format!("[{}]", label));
        self
    }

    /// Add a branch for input `input_index`, scaled to `volume`.
    pub fn add_volume_scaled(&mut self, input_index: usize, volume: f64) -> &mut Self {
        let label = format!("v{}", input_index);
        self.statements.push(format!(
            "[{}:a]volume={}[{}]",
            input_index, volume, label
        ));
        self.branch_labels.push(format!("[{}]", label));
        self
    }

    /// Number of streams feeding the mix (base plus branches).
    pub fn input_count(&self) -> usize {
        1 + self.branch_labels.len()
    }

    /// Finish the graph, writing the mixed stream to `out_label`.
    ///
    /// The averaging mix is followed by a `volume` gain equal to the input
    /// count, restoring the base track's loudness.
    pub fn build(self, out_label: &str) -> String {
        let inputs = self.input_count();
        let mut graph = self.statements;

        let mut mix = String::new();
        mix.push_str(&self.base_label);
        for label in &self.branch_labels {
            mix.push_str(label);
        }
        mix.push_str(&format!(
            "amix=inputs={}:duration=first:dropout_transition=0,volume={}{}",
            inputs, inputs, out_label
        ));
        graph.push(mix);

        graph.join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delayed_branches_mix_onto_base() {
        let mut builder = MixBuilder::new("[0:a]");
        builder.add_delayed(1, 1000).add_delayed(2, 2500);

        assert_eq!(builder.input_count(), 3);
        let graph = builder.build("[outa]");
        assert_eq!(
            graph,
            "[1:a]adelay=1000|1000[a1];\
             [2:a]adelay=2500|2500[a2];\
             [0:a][a1][a2]amix=inputs=3:duration=first:dropout_transition=0,volume=3[outa]"
        );
    }

    #[test]
    fn gain_compensation_equals_input_count() {
        let mut builder = MixBuilder::new("[0:a]");
        for i in 1..=5 {
            builder.add_delayed(i, i as u64 * 100);
        }
        let graph = builder.build("[outa]");
        assert!(graph.contains("amix=inputs=6:"));
        assert!(graph.ends_with(",volume=6[outa]"));
    }

    #[test]
    fn background_music_branch_is_volume_scaled() {
        let mut builder = MixBuilder::new("[1:a]");
        builder.add_volume_scaled(2, 0.2);
        let graph = builder.build("[outa]");
        assert_eq!(
            graph,
            "[2:a]volume=0.2[v2];\
             [1:a][v2]amix=inputs=2:duration=first:dropout_transition=0,volume=2[outa]"
        );
    }

    #[test]
    fn mix_duration_matches_first_input() {
        let mut builder = MixBuilder::new("[0:a]");
        builder.add_delayed(1, 0);
        assert!(builder.build("[m]").contains("duration=first"));
    }
}

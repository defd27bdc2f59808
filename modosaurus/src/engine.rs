// Scale matching engine.
//
// Given a set of note names, finds every (tonic, scale) pair whose notes
// contain all of them. The search hypothesises each of the 12 pitch classes
// in turn as the tonic, re-expresses every input note as an interval above
// that tonic, and accepts each catalog scale whose degree set holds all of
// those intervals. No ranking or deduplication: every pair that fits is
// reported, in tonic order (C up to B) and then catalog order.
//
// Pipeline:
// 1. `NoteInput::normalize`: note names -> `PitchClassSet`. Unrecognised
//    tokens are kept aside in `dropped`, never an error.
// 2. `search`: the 12 x catalog containment test, yielding `Match`es.
// 3. `Match::render`: tonic + degrees -> canonical note names.
//
// Everything here is a pure function of its inputs; the catalog is only
// borrowed, so one catalog can serve any number of concurrent searches.

use crate::catalog::{ScaleCatalog, ScaleDefinition};
use crate::pitch::{PitchClass, PitchClassSet};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Input normalisation
// ---------------------------------------------------------------------------

/// Input notes reduced to pitch classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    /// Distinct pitch classes of the recognised tokens. Duplicates and
    /// enharmonic respellings collapse here.
    pub pitch_classes: PitchClassSet,
    /// Tokens that are not a recognised spelling, in input order.
    pub dropped: Vec<String>,
}

impl NoteInput {
    pub fn normalize<I>(note_names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut input = NoteInput::default();
        for name in note_names {
            let name = name.as_ref();
            match PitchClass::from_name(name) {
                Some(pc) => input.pitch_classes.insert(pc),
                None => input.dropped.push(name.to_string()),
            }
        }
        input
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// A scale from the catalog, rooted on a specific tonic, that contains every
/// input note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub tonic: PitchClass,
    pub scale: &'a ScaleDefinition,
}

impl<'a> Match<'a> {
    /// The scale's pitch classes, ascending from the tonic in degree order.
    pub fn notes(&self) -> Vec<PitchClass> {
        self.scale
            .degrees
            .iter()
            .map(|&degree| self.tonic.transpose_up(degree))
            .collect()
    }

    pub fn render(&self) -> ScaleMatch<'a> {
        ScaleMatch {
            tonic: self.tonic.name(),
            scale_name: &self.scale.name,
            scale_notes: self.notes().into_iter().map(PitchClass::name).collect(),
        }
    }
}

/// A match spelled out with canonical note names.
///
/// Displays as `<tonic> <scale name>: <note> <note> ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleMatch<'a> {
    pub tonic: &'static str,
    pub scale_name: &'a str,
    pub scale_notes: Vec<&'static str>,
}

impl fmt::Display for ScaleMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.tonic, self.scale_name, self.scale_notes.join(" "))
    }
}

/// Matches together with the input tokens that were ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport<'a> {
    pub matches: Vec<ScaleMatch<'a>>,
    pub dropped: Vec<String>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Whether `scale` rooted on `tonic` contains every pitch class in `input`.
/// An empty input never matches.
pub fn is_match(input: PitchClassSet, tonic: PitchClass, scale: &ScaleDefinition) -> bool {
    !input.is_empty()
        && input
            .iter()
            .all(|pc| scale.contains_degree(pc.interval_above(tonic)))
}

/// All (tonic, scale) pairs containing `input`, tonic-major then catalog order.
pub fn search(catalog: &ScaleCatalog, input: PitchClassSet) -> impl Iterator<Item = Match<'_>> {
    PitchClass::all().flat_map(move |tonic| {
        catalog
            .iter()
            .filter(move |scale| is_match(input, tonic, scale))
            .map(move |scale| Match { tonic, scale })
    })
}

/// Find every scale containing the named notes, reporting dropped tokens.
pub fn find_matches_with_report<'a, I>(catalog: &'a ScaleCatalog, note_names: I) -> MatchReport<'a>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let input = NoteInput::normalize(note_names);
    for token in &input.dropped {
        warn!(token = %token, "ignoring unrecognised note name");
    }

    let matches: Vec<ScaleMatch<'a>> = search(catalog, input.pitch_classes)
        .map(|m| m.render())
        .collect();
    debug!(
        pitch_classes = input.pitch_classes.len(),
        dropped = input.dropped.len(),
        matches = matches.len(),
        "scale search complete"
    );

    MatchReport {
        matches,
        dropped: input.dropped,
    }
}

/// Find every scale containing the named notes. Unrecognised names are
/// ignored; if none are recognised the result is empty.
pub fn find_matches<'a, I>(catalog: &'a ScaleCatalog, note_names: I) -> Vec<ScaleMatch<'a>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    find_matches_with_report(catalog, note_names).matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(catalog: &ScaleCatalog, notes: &[&str]) -> Vec<String> {
        find_matches(catalog, notes).iter().map(ToString::to_string).collect()
    }

    fn has_line(catalog: &ScaleCatalog, notes: &[&str], expected: &str) -> bool {
        lines(catalog, notes).iter().any(|l| l == expected)
    }

    #[test]
    fn c_major_triad_fits_c_major() {
        let catalog = ScaleCatalog::builtin();
        let matches = find_matches(&catalog, ["C", "E", "G"]);
        let expected = ScaleMatch {
            tonic: "C",
            scale_name: "Major / Ionian",
            scale_notes: vec!["C", "D", "E", "F", "G", "A", "B"],
        };
        assert!(matches.contains(&expected));
    }

    #[test]
    fn c_diminished_triad_fits_c_diminished() {
        let catalog = ScaleCatalog::builtin();
        assert!(has_line(
            &catalog,
            &["C", "Eb", "Gb"],
            "C Diminished: C D Eb F Gb Ab A B"
        ));
    }

    #[test]
    fn gb_major_renders_b_not_c_flat() {
        let catalog = ScaleCatalog::builtin();
        assert!(has_line(
            &catalog,
            &["Gb", "Bb", "Db"],
            "Gb Major / Ionian: Gb Ab Bb B Db Eb F"
        ));
    }

    #[test]
    fn a_c_d_fits_c_major_f_major_and_a_minor() {
        let catalog = ScaleCatalog::builtin();
        let found = lines(&catalog, &["A", "C", "D"]);
        for expected in [
            "C Major / Ionian: C D E F G A B",
            "F Major / Ionian: F G A Bb C D E",
            "A Natural Minor / Aeolian: A B C D E F G",
        ] {
            assert!(found.iter().any(|l| l == expected), "missing {expected}");
        }
    }

    #[test]
    fn empty_and_unrecognised_input_yield_nothing() {
        let catalog = ScaleCatalog::builtin();
        assert!(find_matches(&catalog, Vec::<String>::new()).is_empty());
        assert!(find_matches(&catalog, ["Zz"]).is_empty());
        assert!(find_matches(&catalog, ["c", "e", "g"]).is_empty());
    }

    #[test]
    fn enharmonic_respelling_does_not_change_result() {
        let catalog = ScaleCatalog::builtin();
        assert_eq!(
            find_matches(&catalog, ["C#", "E", "G"]),
            find_matches(&catalog, ["Db", "E", "G"])
        );
    }

    #[test]
    fn duplicate_notes_do_not_change_result() {
        let catalog = ScaleCatalog::builtin();
        assert_eq!(
            find_matches(&catalog, ["C", "C", "E", "G"]),
            find_matches(&catalog, ["C", "E", "G"])
        );
    }

    #[test]
    fn input_order_does_not_change_result() {
        let catalog = ScaleCatalog::builtin();
        let baseline = find_matches(&catalog, ["D", "F#", "A", "C"]);
        assert!(!baseline.is_empty());
        for permutation in [
            ["F#", "D", "C", "A"],
            ["C", "A", "F#", "D"],
            ["A", "C", "D", "F#"],
        ] {
            assert_eq!(find_matches(&catalog, permutation), baseline);
        }
    }

    #[test]
    fn invalid_tokens_are_dropped_but_reported() {
        let catalog = ScaleCatalog::builtin();
        let report = find_matches_with_report(&catalog, ["C", "H", "E", "g", "G"]);
        assert_eq!(report.dropped, ["H", "g"]);
        assert_eq!(report.matches, find_matches(&catalog, ["C", "E", "G"]));
    }

    #[test]
    fn every_match_contains_every_input_note() {
        let catalog = ScaleCatalog::builtin();
        for notes in [
            vec!["C"],
            vec!["C", "E", "G"],
            vec!["Eb", "A"],
            vec!["D", "E", "F#", "G#", "A#"],
            vec!["B", "C", "Db"],
        ] {
            let input = NoteInput::normalize(&notes).pitch_classes;
            for m in find_matches(&catalog, &notes) {
                let rendered: PitchClassSet = m
                    .scale_notes
                    .iter()
                    .filter_map(|n| PitchClass::from_name(n))
                    .collect();
                assert_eq!(rendered.len(), m.scale_notes.len());
                assert!(input.is_subset(rendered), "{m} does not contain {notes:?}");
            }
        }
    }

    #[test]
    fn every_scale_on_every_tonic_finds_itself() {
        let catalog = ScaleCatalog::builtin();
        for tonic in PitchClass::all() {
            for scale in &catalog {
                let rendered = Match { tonic, scale }.render();
                let matches = find_matches(&catalog, &rendered.scale_notes);
                assert!(
                    matches.contains(&rendered),
                    "{} {} not found from its own notes",
                    tonic,
                    scale.name
                );
            }
        }
    }

    #[test]
    fn rendered_notes_follow_degree_order() {
        let catalog = ScaleCatalog::builtin();
        for m in search(&catalog, PitchClassSet::from_iter([PitchClass::new(4)])) {
            let notes = m.notes();
            assert_eq!(notes.len(), m.scale.degrees.len());
            assert_eq!(notes[0], m.tonic);
            for (note, &degree) in notes.iter().zip(&m.scale.degrees) {
                assert_eq!(note.interval_above(m.tonic), degree);
            }
        }
    }

    #[test]
    fn single_note_matches_once_per_scale_degree() {
        // A lone note matches a scale on exactly as many tonics as the scale
        // has degrees.
        let catalog = ScaleCatalog::builtin();
        let total_degrees: usize = catalog.iter().map(|s| s.degrees.len()).sum();
        assert_eq!(find_matches(&catalog, ["A"]).len(), total_degrees);
    }

    #[test]
    fn output_is_ordered_by_tonic_then_catalog() {
        let catalog = ScaleCatalog::builtin();
        let input: PitchClassSet = [0, 7].into_iter().map(PitchClass::new).collect();
        let matches: Vec<Match<'_>> = search(&catalog, input).collect();
        let position = |name: &str| catalog.iter().position(|s| s.name == name);
        for pair in matches.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                a.tonic < b.tonic
                    || (a.tonic == b.tonic && position(a.scale.name.as_str()) < position(b.scale.name.as_str()))
            );
        }
    }

    #[test]
    fn chromatic_input_matches_nothing_in_builtin() {
        let catalog = ScaleCatalog::builtin();
        let all = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];
        assert!(find_matches(&catalog, all).is_empty());
    }

    #[test]
    fn duplicated_catalog_entries_are_reported_twice() {
        let scale = ScaleDefinition::new("Fifth", vec![0, 7]);
        let catalog = ScaleCatalog::new(vec![scale.clone(), scale]).unwrap();
        assert_eq!(
            lines(&catalog, &["C", "G"]),
            ["C Fifth: C G", "C Fifth: C G"]
        );
    }

    #[test]
    fn custom_catalog_search() {
        let catalog = ScaleCatalog::new(vec![
            ScaleDefinition::new("Tritone", vec![0, 6]),
            ScaleDefinition::new("Major Triad", vec![0, 4, 7]),
        ])
        .unwrap();
        assert_eq!(
            lines(&catalog, &["C", "F#"]),
            ["C Tritone: C Gb", "Gb Tritone: Gb C"]
        );
        assert_eq!(lines(&catalog, &["E", "G#", "B"]), ["E Major Triad: E Ab B"]);
    }

    #[test]
    fn report_serializes_to_json() {
        let catalog = ScaleCatalog::new(vec![ScaleDefinition::new("Fifth", vec![0, 7])]).unwrap();
        let report = find_matches_with_report(&catalog, ["D", "x"]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dropped"][0], "x");
        assert_eq!(json["matches"][0]["tonic"], "D");
        assert_eq!(json["matches"][1]["tonic"], "G");
        assert_eq!(json["matches"][1]["scale_notes"][1], "D");
    }
}

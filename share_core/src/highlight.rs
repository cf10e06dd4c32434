//! Highlight selection over one completed session.
//!
//! The picker owns a value copy of the session and a bounded selection of
//! exercises and individual sets. Selecting a whole exercise supersedes any
//! of its individually selected sets for counting and export. Confirmation
//! re-validates the bounds no matter what the UI allowed, then emits one or
//! more shareable content values.
//!
//! One selection belongs to one interactive session; it is never mutated
//! from more than one input source.

use crate::content::{
    self, ShareableContent,
};
use crate::types::{Session, SetData};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Upper bound on featured items per share
pub const MAX_HIGHLIGHTS: usize = 5;

/// Ephemeral picker state for one session. Created when the picker opens,
/// destroyed on confirm or cancel; nothing here is persisted.
#[derive(Clone, Debug)]
pub struct HighlightSelection {
    session: Session,
    distance_unit: String,
    selected_exercise_ids: HashSet<Uuid>,
    selected_set_ids: HashMap<Uuid, HashSet<Uuid>>,
    share_entire_session: bool,
}

impl HighlightSelection {
    /// Open a picker over a captured session
    pub fn new(session: Session, distance_unit: impl Into<String>) -> Self {
        Self {
            session,
            distance_unit: distance_unit.into(),
            selected_exercise_ids: HashSet::new(),
            selected_set_ids: HashMap::new(),
            share_entire_session: false,
        }
    }

    /// Toggle whole-exercise selection.
    ///
    /// Returns a validation error when adding the exercise would push the
    /// combined count past [`MAX_HIGHLIGHTS`].
    pub fn toggle_exercise(&mut self, exercise_id: Uuid) -> Result<()> {
        if self.selected_exercise_ids.contains(&exercise_id) {
            self.selected_exercise_ids.remove(&exercise_id);
            return Ok(());
        }

        // Adding the exercise supersedes its individual sets, so compute the
        // prospective count with those excluded.
        let superseded = self
            .selected_set_ids
            .get(&exercise_id)
            .map_or(0, HashSet::len);
        let prospective = self.highlight_count() - superseded + 1;
        if prospective > MAX_HIGHLIGHTS {
            return Err(Error::Validation(format!(
                "highlight limit of {} reached",
                MAX_HIGHLIGHTS
            )));
        }

        self.selected_exercise_ids.insert(exercise_id);
        tracing::debug!(
            "Selected exercise {}, {} highlights total",
            exercise_id,
            self.highlight_count()
        );
        Ok(())
    }

    /// Toggle selection of one individual set
    pub fn toggle_set(&mut self, exercise_id: Uuid, set_id: Uuid) -> Result<()> {
        let already_selected = self
            .selected_set_ids
            .get(&exercise_id)
            .is_some_and(|sets| sets.contains(&set_id));
        if already_selected {
            if let Some(sets) = self.selected_set_ids.get_mut(&exercise_id) {
                sets.remove(&set_id);
                if sets.is_empty() {
                    self.selected_set_ids.remove(&exercise_id);
                }
            }
            return Ok(());
        }

        // Counts only when the owning exercise is not wholly selected
        let counts = !self.selected_exercise_ids.contains(&exercise_id);
        if counts && self.highlight_count() + 1 > MAX_HIGHLIGHTS {
            return Err(Error::Validation(format!(
                "highlight limit of {} reached",
                MAX_HIGHLIGHTS
            )));
        }

        self.selected_set_ids
            .entry(exercise_id)
            .or_default()
            .insert(set_id);
        Ok(())
    }

    /// Orthogonal toggle: confirm packages the whole session with the
    /// highlights embedded instead of standalone shares.
    pub fn set_share_entire_session(&mut self, share: bool) {
        self.share_entire_session = share;
    }

    pub fn share_entire_session(&self) -> bool {
        self.share_entire_session
    }

    /// Combined highlight count: whole exercises plus individual sets of
    /// exercises that are not wholly selected.
    pub fn highlight_count(&self) -> usize {
        let set_count: usize = self
            .selected_set_ids
            .iter()
            .filter(|(exercise_id, _)| !self.selected_exercise_ids.contains(exercise_id))
            .map(|(_, sets)| sets.len())
            .sum();
        self.selected_exercise_ids.len() + set_count
    }

    pub fn is_empty(&self) -> bool {
        self.highlight_count() == 0
    }

    /// Whether confirm is currently allowed
    pub fn can_confirm(&self) -> bool {
        let count = self.highlight_count();
        count >= 1 && count <= MAX_HIGHLIGHTS
    }

    /// Confirm the selection, emitting the shares.
    ///
    /// Bounds are enforced here regardless of what the UI let through.
    /// With the full-session toggle on, emits one session share embedding
    /// the highlighted ids; otherwise one share per selected exercise and
    /// one per surviving individual set, in session order.
    pub fn confirm(self) -> Result<Vec<ShareableContent>> {
        let count = self.highlight_count();
        if count == 0 {
            return Err(Error::Validation("no highlights selected".into()));
        }
        if count > MAX_HIGHLIGHTS {
            return Err(Error::Validation(format!(
                "highlight limit of {} exceeded",
                MAX_HIGHLIGHTS
            )));
        }

        // Resolve every selected id against the session tree up front so a
        // stale id fails the whole confirm, not one emitted share.
        for exercise_id in &self.selected_exercise_ids {
            if self.session.find_exercise(*exercise_id).is_none() {
                return Err(Error::NotFound(format!(
                    "exercise {} not in session",
                    exercise_id
                )));
            }
        }
        for (exercise_id, set_ids) in &self.selected_set_ids {
            if self.selected_exercise_ids.contains(exercise_id) {
                continue; // superseded, never exported
            }
            for set_id in set_ids {
                if self.session.find_set(*exercise_id, *set_id).is_none() {
                    return Err(Error::NotFound(format!(
                        "set {} not in exercise {}",
                        set_id, exercise_id
                    )));
                }
            }
        }

        if self.share_entire_session {
            return self.confirm_full_session();
        }
        self.confirm_standalone()
    }

    /// Discard the selection without emitting anything
    pub fn cancel(self) {
        tracing::debug!(
            "Highlight picker cancelled with {} selected",
            self.highlight_count()
        );
    }

    fn confirm_full_session(self) -> Result<Vec<ShareableContent>> {
        // Session order keeps the embedded id lists deterministic
        let exercise_ids: Vec<Uuid> = self
            .session
            .exercises()
            .filter(|e| self.selected_exercise_ids.contains(&e.id))
            .map(|e| e.id)
            .collect();

        let mut set_ids: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for exercise in self.session.exercises() {
            if self.selected_exercise_ids.contains(&exercise.id) {
                continue;
            }
            if let Some(selected) = self.selected_set_ids.get(&exercise.id) {
                let ordered: Vec<Uuid> = exercise
                    .all_sets()
                    .filter(|s| selected.contains(&s.id))
                    .map(|s| s.id)
                    .collect();
                if !ordered.is_empty() {
                    set_ids.insert(exercise.id, ordered);
                }
            }
        }

        let share = content::share_session_with_highlights(
            &self.session,
            if exercise_ids.is_empty() {
                None
            } else {
                Some(exercise_ids)
            },
            if set_ids.is_empty() {
                None
            } else {
                Some(set_ids)
            },
            &self.distance_unit,
        )?;
        Ok(vec![share])
    }

    fn confirm_standalone(self) -> Result<Vec<ShareableContent>> {
        let mut shares = Vec::new();

        for exercise in self.session.exercises() {
            if self.selected_exercise_ids.contains(&exercise.id) {
                shares.push(content::share_exercise(
                    exercise,
                    Some(&self.session.workout_name),
                    &self.distance_unit,
                )?);
                continue; // whole exercise supersedes its individual sets
            }

            if let Some(selected) = self.selected_set_ids.get(&exercise.id) {
                let sets: Vec<&SetData> = exercise
                    .all_sets()
                    .filter(|s| selected.contains(&s.id))
                    .collect();
                for set in sets {
                    // PR detection needs history the picker does not have
                    shares.push(content::share_set(
                        &exercise.name,
                        set,
                        false,
                        &self.distance_unit,
                    )?);
                }
            }
        }

        Ok(shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DecodedContent;
    use crate::testutil;

    fn picker() -> HighlightSelection {
        HighlightSelection::new(testutil::strength_session(), "mi")
    }

    #[test]
    fn test_confirm_with_nothing_selected_is_rejected() {
        let selection = picker();
        assert!(!selection.can_confirm());
        assert!(matches!(
            selection.confirm(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_sixth_selection_is_rejected() {
        let session = testutil::strength_session();
        let mut selection = HighlightSelection::new(session.clone(), "mi");

        let exercise = &session.modules[0].exercises[0];
        let sets: Vec<Uuid> = exercise.all_sets().map(|s| s.id).collect();
        assert!(sets.len() >= 4);

        for set_id in sets.iter().take(4) {
            selection.toggle_set(exercise.id, *set_id).unwrap();
        }
        let second = &session.modules[0].exercises[1];
        selection.toggle_exercise(second.id).unwrap();
        assert_eq!(selection.highlight_count(), 5);
        assert!(selection.can_confirm());

        let third = &session.modules[1].exercises[0];
        let err = selection.toggle_exercise(third.id).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(selection.highlight_count(), 5);

        // Exactly five confirms fine
        let shares = selection.confirm().unwrap();
        assert_eq!(shares.len(), 5);
    }

    #[test]
    fn test_deselect_returns_to_empty() {
        let session = testutil::strength_session();
        let mut selection = HighlightSelection::new(session.clone(), "mi");
        let exercise_id = session.modules[0].exercises[0].id;

        selection.toggle_exercise(exercise_id).unwrap();
        assert_eq!(selection.highlight_count(), 1);

        selection.toggle_exercise(exercise_id).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_exercise_selection_supersedes_its_sets() {
        let session = testutil::strength_session();
        let mut selection = HighlightSelection::new(session.clone(), "mi");
        let exercise = &session.modules[0].exercises[0];
        let set_id = exercise.set_groups[0].sets[0].id;

        selection.toggle_set(exercise.id, set_id).unwrap();
        selection.toggle_exercise(exercise.id).unwrap();

        // The set still exists in state but stops counting
        assert_eq!(selection.highlight_count(), 1);

        let shares = selection.confirm().unwrap();
        assert_eq!(shares.len(), 1);
        assert!(matches!(shares[0], ShareableContent::Exercise { .. }));
    }

    #[test]
    fn test_standalone_confirm_emits_in_session_order() {
        let session = testutil::strength_session();
        let mut selection = HighlightSelection::new(session.clone(), "mi");

        let first = &session.modules[0].exercises[0];
        let second = &session.modules[0].exercises[1];

        // Select in reverse order; export follows the session tree
        selection.toggle_exercise(second.id).unwrap();
        selection.toggle_exercise(first.id).unwrap();

        let shares = selection.confirm().unwrap();
        assert_eq!(shares.len(), 2);
        let names: Vec<String> = shares
            .iter()
            .map(|s| match s.decoded() {
                Some(DecodedContent::Exercise(b)) => b.exercise.name.clone(),
                other => panic!("Expected exercise share, got {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["Back Squat", "Romanian Deadlift"]);
    }

    #[test]
    fn test_full_session_confirm_embeds_highlights() {
        let session = testutil::strength_session();
        let mut selection = HighlightSelection::new(session.clone(), "mi");

        let first = &session.modules[0].exercises[0];
        let second = &session.modules[0].exercises[1];
        let set_id = second.set_groups[0].sets[0].id;

        selection.toggle_exercise(first.id).unwrap();
        selection.toggle_set(second.id, set_id).unwrap();
        selection.set_share_entire_session(true);

        let shares = selection.confirm().unwrap();
        assert_eq!(shares.len(), 1);

        match shares[0].decoded() {
            Some(DecodedContent::Session(bundle)) => {
                assert_eq!(
                    bundle.highlighted_exercise_ids.as_deref(),
                    Some(&[first.id][..])
                );
                let set_ids = bundle.highlighted_set_ids.as_ref().unwrap();
                assert_eq!(set_ids.get(&second.id).map(Vec::len), Some(1));
            }
            other => panic!("Expected session share, got {:?}", other),
        }
    }

    #[test]
    fn test_confirm_with_stale_id_is_not_found() {
        let mut selection = picker();
        selection.toggle_exercise(Uuid::new_v4()).unwrap();

        assert!(matches!(
            selection.confirm(),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let session = testutil::strength_session();
        let mut selection = HighlightSelection::new(session.clone(), "mi");
        selection
            .toggle_exercise(session.modules[0].exercises[0].id)
            .unwrap();
        selection.cancel();
    }
}

//! Summary formatting for shared content.
//!
//! Pure dispatch from a decoded bundle to a presentational summary (badge
//! icon, label, title, stat strings). No I/O and no side effects, so every
//! surface (feed card, chat bubble, compose preview) calls the same
//! functions and renders identically.

use crate::classify::{self, SetKind};
use crate::codec::DecodedContent;
use crate::content::ShareableContent;
use crate::types::{SessionExercise, SetData, SetGroup};

/// Badge icon for a content summary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Trophy,
    Flame,
    Dumbbell,
    Stopwatch,
    Hourglass,
    Calendar,
    Layers,
    Star,
    Quote,
    Warning,
}

impl Icon {
    pub fn as_str(self) -> &'static str {
        match self {
            Icon::Trophy => "trophy",
            Icon::Flame => "flame",
            Icon::Dumbbell => "dumbbell",
            Icon::Stopwatch => "stopwatch",
            Icon::Hourglass => "hourglass",
            Icon::Calendar => "calendar",
            Icon::Layers => "layers",
            Icon::Star => "star",
            Icon::Quote => "quote",
            Icon::Warning => "warning",
        }
    }
}

/// Presentational summary of one piece of shared content
#[derive(Clone, Debug, PartialEq)]
pub struct ContentSummary {
    pub icon: Icon,
    pub label: String,
    pub title: String,
    pub stats: Vec<String>,
}

impl ContentSummary {
    /// Stats joined the way list rows display them
    pub fn stat_line(&self) -> String {
        self.stats.join(" · ")
    }
}

/// The one place the PR badge is decided. Every surface that shows a shared
/// set goes through here.
pub fn set_badge(is_pr: bool) -> (Icon, &'static str) {
    if is_pr {
        (Icon::Trophy, "NEW PR")
    } else {
        (Icon::Flame, "SET")
    }
}

/// Map a decoded bundle to its display summary
pub fn describe(decoded: &DecodedContent) -> ContentSummary {
    match decoded {
        DecodedContent::Program(b) => ContentSummary {
            icon: Icon::Layers,
            label: "PROGRAM".into(),
            title: b.program.name.clone(),
            stats: vec![
                count_stat(b.program.modules.len(), "module"),
                count_stat(b.program.workout_count(), "workout"),
            ],
        },
        DecodedContent::Workout(b) => ContentSummary {
            icon: Icon::Dumbbell,
            label: "WORKOUT".into(),
            title: b.workout.name.clone(),
            stats: vec![count_stat(b.workout.exercises.len(), "exercise")],
        },
        DecodedContent::Module(b) => ContentSummary {
            icon: Icon::Layers,
            label: "MODULE".into(),
            title: b.module.name.clone(),
            stats: vec![count_stat(b.module.workouts.len(), "workout")],
        },
        DecodedContent::Session(b) => {
            let exercise_count = b.session.exercises().count();
            let mut stats = vec![
                b.date.format("%b %-d, %Y").to_string(),
                count_stat(exercise_count, "exercise"),
            ];
            let highlighted = b.highlighted_exercise_ids.as_ref().map_or(0, |v| v.len())
                + b.highlighted_set_ids
                    .as_ref()
                    .map_or(0, |m| m.values().map(|v| v.len()).sum());
            if highlighted > 0 {
                stats.push(count_stat(highlighted, "highlight"));
            }
            ContentSummary {
                icon: Icon::Calendar,
                label: "SESSION".into(),
                title: b.workout_name.clone(),
                stats,
            }
        }
        DecodedContent::Exercise(b) => {
            let (icon, stats) = exercise_stats(&b.exercise, &b.distance_unit);
            ContentSummary {
                icon,
                label: "EXERCISE".into(),
                title: b.exercise.name.clone(),
                stats,
            }
        }
        DecodedContent::Set(b) => {
            let (icon, label) = set_badge(b.is_pr);
            ContentSummary {
                icon,
                label: label.into(),
                title: b.exercise_name.clone(),
                stats: set_stats(&b.set, &b.distance_unit),
            }
        }
        DecodedContent::CompletedModule(b) => {
            let set_count: usize = b
                .module
                .exercises
                .iter()
                .map(|e| e.completed_sets().len())
                .sum();
            ContentSummary {
                icon: Icon::Layers,
                label: "MODULE COMPLETE".into(),
                title: b.module.name.clone(),
                stats: vec![
                    count_stat(b.module.exercises.len(), "exercise"),
                    count_stat(set_count, "set"),
                ],
            }
        }
        DecodedContent::Highlights(b) => ContentSummary {
            icon: Icon::Star,
            label: "HIGHLIGHTS".into(),
            title: b.workout_name.clone(),
            stats: vec![
                b.date.format("%b %-d, %Y").to_string(),
                count_stat(b.highlight_count(), "highlight"),
            ],
        },
        DecodedContent::ExerciseInstance(b) => {
            let planned: u32 = b.instance.set_groups.iter().map(|g| g.target_sets).sum();
            ContentSummary {
                icon: Icon::Dumbbell,
                label: "EXERCISE".into(),
                title: b.instance.name.clone(),
                stats: vec![count_stat(planned as usize, "set")],
            }
        }
        DecodedContent::SetGroup(b) => ContentSummary {
            icon: Icon::Dumbbell,
            label: "SETS".into(),
            title: b.exercise_name.clone(),
            stats: vec![set_group_stat(&b.group)],
        },
        DecodedContent::CompletedSetGroup(b) => {
            let completed: Vec<&SetData> = b.group.sets.iter().filter(|s| s.completed).collect();
            let kind = classify::classify(&b.group.sets);
            ContentSummary {
                icon: kind_icon(kind),
                label: "SETS".into(),
                title: b.exercise_name.clone(),
                stats: completed_stats(&completed, kind, &b.distance_unit),
            }
        }
        DecodedContent::Failed { original_type } => failed_summary(original_type.as_deref()),
    }
}

/// Map a content value to its display summary, decoding the payload once
/// (memoized) where one exists.
pub fn describe_content(content: &ShareableContent) -> ContentSummary {
    match content {
        ShareableContent::Text { text } => ContentSummary {
            icon: Icon::Quote,
            label: "TEXT".into(),
            title: text.clone(),
            stats: vec![],
        },
        ShareableContent::DecodeFailed { original_type } => {
            failed_summary(original_type.as_deref())
        }
        other => match other.decoded() {
            Some(decoded) => describe(decoded),
            None => failed_summary(None),
        },
    }
}

/// The stable placeholder for content that could not be decoded
fn failed_summary(original_type: Option<&str>) -> ContentSummary {
    ContentSummary {
        icon: Icon::Warning,
        label: "UNAVAILABLE".into(),
        title: "Content unavailable".into(),
        stats: vec![format!("type: {}", original_type.unwrap_or("unknown"))],
    }
}

// ============================================================================
// Per-kind stats
// ============================================================================

fn kind_icon(kind: SetKind) -> Icon {
    match kind {
        SetKind::Strength | SetKind::Band | SetKind::Unknown => Icon::Dumbbell,
        SetKind::Cardio => Icon::Stopwatch,
        SetKind::Isometric => Icon::Hourglass,
    }
}

fn exercise_stats(exercise: &SessionExercise, unit: &str) -> (Icon, Vec<String>) {
    let all_sets: Vec<SetData> = exercise.all_sets().cloned().collect();
    let completed = exercise.completed_sets();
    let kind = classify::classify(&all_sets);
    (kind_icon(kind), completed_stats(&completed, kind, unit))
}

/// Aggregate stats over completed sets, phrased per classified kind
fn completed_stats(completed: &[&SetData], kind: SetKind, unit: &str) -> Vec<String> {
    let mut stats = vec![count_stat(completed.len(), "set")];
    match kind {
        SetKind::Strength => {
            if let Some(top) = top_strength_set(completed) {
                stats.push(top_set_stat(top));
            }
        }
        SetKind::Cardio => {
            let total_duration: u32 = completed
                .iter()
                .filter_map(|s| s.duration_seconds)
                .sum();
            let total_distance: f64 = completed.iter().filter_map(|s| s.distance).sum();
            if total_duration > 0 {
                stats.push(fmt_duration(total_duration));
            }
            if total_distance > 0.0 {
                stats.push(fmt_distance(total_distance, unit));
            }
        }
        SetKind::Isometric => {
            let top_hold = completed
                .iter()
                .filter_map(|s| s.hold_time_seconds)
                .max()
                .unwrap_or(0);
            if top_hold > 0 {
                stats.push(format!("Top hold: {}", fmt_duration(top_hold)));
            }
        }
        SetKind::Band => {
            if let Some(top) = top_band_set(completed) {
                let color = top.band_color.as_deref().unwrap_or("band");
                match top.reps {
                    Some(reps) => stats.push(format!("Top: {} band × {}", color, reps)),
                    None => stats.push(format!("Top: {} band", color)),
                }
            }
        }
        SetKind::Unknown => {}
    }
    stats
}

/// Stats for a single shared set
fn set_stats(set: &SetData, unit: &str) -> Vec<String> {
    match classify::classify_set(set) {
        SetKind::Strength => vec![rep_stat(set)],
        SetKind::Cardio => {
            let mut stats = Vec::new();
            if let Some(d) = set.duration_seconds.filter(|d| *d > 0) {
                stats.push(fmt_duration(d));
            }
            if let Some(d) = set.distance.filter(|d| *d > 0.0) {
                stats.push(fmt_distance(d, unit));
            }
            stats
        }
        SetKind::Isometric => {
            vec![format!(
                "{} hold",
                fmt_duration(set.hold_time_seconds.unwrap_or(0))
            )]
        }
        SetKind::Band => {
            let color = set.band_color.as_deref().unwrap_or("band");
            match set.reps {
                Some(reps) => vec![format!("{} band × {}", color, reps)],
                None => vec![format!("{} band", color)],
            }
        }
        SetKind::Unknown => vec![],
    }
}

/// Top set for strength: maximum weight among completed sets, first
/// occurrence wins ties (stable).
fn top_strength_set<'a>(completed: &[&'a SetData]) -> Option<&'a SetData> {
    let mut best: Option<&SetData> = None;
    for &set in completed {
        let weight = set.weight.unwrap_or(0.0);
        match best {
            Some(current) if weight <= current.weight.unwrap_or(0.0) => {}
            _ => best = Some(set),
        }
    }
    best
}

/// Top band set: maximum reps, first occurrence wins ties
fn top_band_set<'a>(completed: &[&'a SetData]) -> Option<&'a SetData> {
    let mut best: Option<&SetData> = None;
    for &set in completed {
        let reps = set.reps.unwrap_or(0);
        match best {
            Some(current) if reps <= current.reps.unwrap_or(0) => {}
            _ => best = Some(set),
        }
    }
    best
}

fn top_set_stat(top: &SetData) -> String {
    format!("Top: {}", rep_stat(top))
}

fn rep_stat(set: &SetData) -> String {
    match (set.weight, set.reps) {
        (Some(w), Some(r)) => format!("{} × {}", fmt_quantity(w), r),
        (Some(w), None) => fmt_quantity(w),
        (None, Some(r)) => format!("{} reps", r),
        (None, None) => String::new(),
    }
}

fn set_group_stat(group: &SetGroup) -> String {
    let mut stat = match group.target_reps {
        Some(reps) => format!("{} × {}", group.target_sets, reps),
        None => count_stat(group.target_sets as usize, "set"),
    };
    if let Some(weight) = group.target_weight {
        stat.push_str(&format!(" @ {}", fmt_quantity(weight)));
    }
    stat
}

fn count_stat(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

// ============================================================================
// Formatting policies
// ============================================================================

/// Duration policy: `<60s → "Ns"`, `<1h → "Mm Ss"` (seconds omitted when
/// zero), `≥1h → "Hh Mm"`.
pub fn fmt_duration(seconds: u32) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        let rest = seconds % 60;
        if rest == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m {}s", minutes, rest)
        }
    } else {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        format!("{}h {}m", hours, minutes)
    }
}

/// Distance policy: integral values render without a decimal, everything
/// else with one decimal place; unit abbreviation comes from the bundle.
pub fn fmt_distance(value: f64, unit: &str) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if (rounded - rounded.round()).abs() < f64::EPSILON {
        format!("{} {}", rounded.round() as i64, unit)
    } else {
        format!("{:.1} {}", rounded, unit)
    }
}

/// One decimal place for fractional weights, none otherwise
fn fmt_quantity(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

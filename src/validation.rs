//! Input validation and schedule audits.
//!
//! Pre-run checks catch structural problems in the roster and settings
//! (duplicate ids, out-of-range levels, an unusable time window) before
//! they silently shrink the output. Post-run audits re-check a produced —
//! possibly hand-edited — schedule against the fairness rules; manual seat
//! swaps deliberately bypass revalidation, so the audit is the opt-in way
//! to surface what a swap broke.

use std::collections::{HashMap, HashSet};

use crate::engine::{FairnessLedger, MatchCandidate};
use crate::models::{Player, Schedule, Settings, LEVEL_MAX, LEVEL_MIN};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two players share the same ID.
    DuplicateId,
    /// A player has an empty display name.
    EmptyName,
    /// A level lies outside the valid range.
    LevelOutOfRange,
    /// The end time is not after the start time.
    EmptyTimeWindow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster before scheduling.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(players: &[Player]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for player in players {
        if !ids.insert(player.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate player ID: {}", player.id),
            ));
        }
        if player.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Player '{}' has an empty name", player.id),
            ));
        }
        if player.level < LEVEL_MIN || player.level > LEVEL_MAX {
            errors.push(ValidationError::new(
                ValidationErrorKind::LevelOutOfRange,
                format!(
                    "Player '{}' has level {} outside {LEVEL_MIN}..={LEVEL_MAX}",
                    player.id, player.level
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates run settings.
///
/// A window too small for one slot is legal (it yields an empty schedule),
/// but an inverted or zero-length window is almost always a data-entry
/// mistake, so it is flagged here.
pub fn validate_settings(settings: &Settings) -> ValidationResult {
    let mut errors = Vec::new();
    if settings.end_time <= settings.start_time {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTimeWindow,
            format!(
                "End time {} is not after start time {}",
                settings.end_time, settings.start_time
            ),
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A fairness or structural finding in a produced schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditFinding {
    /// Finding category.
    pub kind: AuditFindingKind,
    /// Slot of the offending match.
    pub slot_index: usize,
    /// Court of the offending match.
    pub court: u32,
    /// Human-readable description.
    pub message: String,
}

/// Categories of schedule audit findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFindingKind {
    /// The same player holds two roles in one match.
    DuplicateRole,
    /// A player appears in two matches of the same slot.
    DoubleBooked,
    /// A pair exceeded the teammate limit outside a relaxed match.
    PartnerLimitExceeded,
    /// A pair exceeded the opponent limit outside a relaxed match.
    OpponentLimitExceeded,
    /// A player exceeded the consecutive-play limit outside a relaxed match.
    ConsecutiveLimitExceeded,
}

impl AuditFinding {
    fn new(
        kind: AuditFindingKind,
        slot_index: usize,
        court: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            slot_index,
            court,
            message: message.into(),
        }
    }
}

/// Re-checks a produced schedule against the fairness limits.
///
/// Replays the matches in slot order through a fresh [`FairnessLedger`] and
/// reports every rule the schedule breaks. Matches flagged `relaxed` are
/// exempt from the limit checks (the generator already knew no compliant
/// choice existed) but never from the structural ones.
pub fn audit_schedule(schedule: &Schedule, settings: &Settings) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    let ids: HashSet<String> = schedule
        .matches
        .iter()
        .flat_map(|m| m.participants().map(|p| p.id.clone()))
        .collect();
    let mut ledger = FairnessLedger::new(ids.iter().map(String::as_str));

    let mut ordered: Vec<_> = schedule.matches.iter().collect();
    ordered.sort_by_key(|m| (m.slot_index, m.court));

    let mut slot_participants: HashMap<usize, HashSet<String>> = HashMap::new();

    for m in ordered {
        // Structural: distinct roles within the match.
        let mut seen = HashSet::new();
        for p in m.participants() {
            if !seen.insert(p.id.clone()) {
                findings.push(AuditFinding::new(
                    AuditFindingKind::DuplicateRole,
                    m.slot_index,
                    m.court,
                    format!("'{}' holds two roles in one match", p.name),
                ));
            }
        }

        // Structural: nobody in two matches of one slot.
        let booked = slot_participants.entry(m.slot_index).or_default();
        for p in m.participants() {
            if !booked.insert(p.id.clone()) {
                findings.push(AuditFinding::new(
                    AuditFindingKind::DoubleBooked,
                    m.slot_index,
                    m.court,
                    format!("'{}' appears twice in slot {}", p.name, m.slot_index),
                ));
            }
        }

        let candidate = MatchCandidate {
            team1: [m.teams[0][0].id.clone(), m.teams[0][1].id.clone()],
            team2: [m.teams[1][0].id.clone(), m.teams[1][1].id.clone()],
            umpire: m.officials.umpire.id.clone(),
            line1: m.officials.line1.id.clone(),
            line2: m.officials.line2.id.clone(),
            relaxed: m.relaxed,
        };

        if !m.relaxed {
            for (team, kind) in [
                (&candidate.team1, AuditFindingKind::PartnerLimitExceeded),
                (&candidate.team2, AuditFindingKind::PartnerLimitExceeded),
            ] {
                if ledger.partner_count(&team[0], &team[1]) + 1 > settings.max_same_teammate {
                    findings.push(AuditFinding::new(
                        kind,
                        m.slot_index,
                        m.court,
                        format!("pair {}-{} over the teammate limit", team[0], team[1]),
                    ));
                }
            }
            for a in &candidate.team1 {
                for b in &candidate.team2 {
                    if ledger.opponent_count(a, b) + 1 > settings.max_same_opponent {
                        findings.push(AuditFinding::new(
                            AuditFindingKind::OpponentLimitExceeded,
                            m.slot_index,
                            m.court,
                            format!("pair {a}-{b} over the opponent limit"),
                        ));
                    }
                }
            }
            for id in candidate.playing() {
                if ledger.played_previous_slot(id, m.slot_index)
                    && ledger.streak(id) + 1 > settings.max_consecutive_plays
                {
                    findings.push(AuditFinding::new(
                        AuditFindingKind::ConsecutiveLimitExceeded,
                        m.slot_index,
                        m.court,
                        format!("'{id}' over the consecutive-play limit"),
                    ));
                }
            }
        }

        ledger.commit(&candidate, m.slot_index);
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generate_schedule;
    use crate::models::{Gender, SeatRef};
    use chrono::{NaiveDate, NaiveTime};

    fn roster(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                Player::new(format!("p{i}"), format!("Player {i}"))
                    .with_gender(if i % 2 == 0 { Gender::Male } else { Gender::Female })
                    .with_level(3 + (i % 5) as u8)
            })
            .collect()
    }

    fn settings() -> Settings {
        Settings::new(NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()).with_window(
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 36, 0).unwrap(),
        )
    }

    #[test]
    fn test_valid_roster_passes() {
        assert!(validate_roster(&roster(8)).is_ok());
    }

    #[test]
    fn test_duplicate_ids_detected() {
        let mut players = roster(4);
        players[3].id = "p0".to_string();
        let errors = validate_roster(&players).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_bad_level_and_name_detected() {
        let mut players = roster(2);
        players[0].level = 0; // direct field write bypasses the clamp
        players[1].name = "  ".to_string();
        let errors = validate_roster(&players).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::LevelOutOfRange));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyName));
    }

    #[test]
    fn test_inverted_window_detected() {
        let s = settings().with_window(
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        let errors = validate_settings(&s).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyTimeWindow);
        assert!(validate_settings(&settings()).is_ok());
    }

    #[test]
    fn test_generated_schedule_audits_clean() {
        let s = settings();
        let schedule = generate_schedule(&roster(8), &s);
        assert!(!schedule.is_empty());
        assert!(audit_schedule(&schedule, &s).is_empty());
    }

    #[test]
    fn test_audit_flags_double_booking_after_bad_swap() {
        let s = settings();
        let mut schedule = generate_schedule(&roster(8), &s);
        assert!(schedule.match_count() >= 2);

        // Swap a slot-0 player into slot 1, where they may already be seated
        // or officiating; force a duplicate by copying instead of swapping.
        let donor = schedule.matches[0].teams[0][0].clone();
        schedule.matches[1].teams[0][0] = donor.clone();
        schedule.matches[1].teams[0][1] = donor;

        let findings = audit_schedule(&schedule, &s);
        assert!(findings
            .iter()
            .any(|f| f.kind == AuditFindingKind::DuplicateRole));
    }

    #[test]
    fn test_audit_flags_partner_overuse() {
        let s = settings().with_limits(1, 4, 4);
        let mut schedule = generate_schedule(&roster(8), &s);
        assert!(schedule.match_count() >= 2);

        // Manually force the slot-0 first team to reappear in slot 1.
        let pair = [
            schedule.matches[0].teams[0][0].clone(),
            schedule.matches[0].teams[0][1].clone(),
        ];
        schedule.matches[1].teams[0] = pair;

        let findings = audit_schedule(&schedule, &s);
        assert!(findings
            .iter()
            .any(|f| f.kind == AuditFindingKind::PartnerLimitExceeded
                || f.kind == AuditFindingKind::DoubleBooked));
    }

    #[test]
    fn test_swap_then_audit_round_trip() {
        let s = settings();
        let mut schedule = generate_schedule(&roster(8), &s);
        assert!(schedule.match_count() >= 2);

        // A swap of two seats between different slots keeps the schedule
        // structurally sound unless the player already appears in the
        // destination slot; the audit reports whichever is the case.
        let a = SeatRef { slot_index: 0, court: 1, team: 0, seat: 0 };
        let b = SeatRef { slot_index: 1, court: 1, team: 0, seat: 0 };
        assert!(schedule.swap_players(a, b));
        let findings = audit_schedule(&schedule, &s);
        for f in &findings {
            assert!(matches!(
                f.kind,
                AuditFindingKind::DoubleBooked
                    | AuditFindingKind::PartnerLimitExceeded
                    | AuditFindingKind::OpponentLimitExceeded
                    | AuditFindingKind::ConsecutiveLimitExceeded
            ));
        }
    }
}

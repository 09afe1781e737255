//! Domain records (users, submissions, reviews) and the closed enums that
//! describe them.
//!
//! Relationships are plain foreign-key ids. Nothing here holds a pointer back
//! to its owner; joins happen on demand through the store.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Roles ───────────────────────────────────────────────────────────────────

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  Author,
  Reviewer,
  Chair,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Author => "author",
      Role::Reviewer => "reviewer",
      Role::Chair => "chair",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "author" => Ok(Role::Author),
      "reviewer" => Ok(Role::Reviewer),
      "chair" => Ok(Role::Chair),
      _ => Err(Error::InvalidArgument(format!("unknown role: {s:?}"))),
    }
  }
}

// ─── Submission status ───────────────────────────────────────────────────────

/// Where a submission is in its lifecycle.
///
/// ```text
/// Submitted ─▶ UnderReview ─▶ Accept ─▶ CameraReady
///                         └─▶ Reject
/// ```
///
/// The serialised names are the values persisted and returned over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmissionStatus {
  #[default]
  #[serde(rename = "Submit")]
  Submitted,
  #[serde(rename = "under_review")]
  UnderReview,
  #[serde(rename = "accept")]
  Accept,
  #[serde(rename = "reject")]
  Reject,
  #[serde(rename = "camera_ready_submit")]
  CameraReady,
}

impl SubmissionStatus {
  pub const ALL: [SubmissionStatus; 5] = [
    SubmissionStatus::Submitted,
    SubmissionStatus::UnderReview,
    SubmissionStatus::Accept,
    SubmissionStatus::Reject,
    SubmissionStatus::CameraReady,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      SubmissionStatus::Submitted => "Submit",
      SubmissionStatus::UnderReview => "under_review",
      SubmissionStatus::Accept => "accept",
      SubmissionStatus::Reject => "reject",
      SubmissionStatus::CameraReady => "camera_ready_submit",
    }
  }

  /// Whether a chair decision has been recorded. A submission carries a
  /// `decision_date` exactly when this is true.
  pub fn is_decided(self) -> bool {
    matches!(
      self,
      SubmissionStatus::Accept | SubmissionStatus::Reject | SubmissionStatus::CameraReady
    )
  }

  /// Whether intake (reviews, camera-ready uploads) may move a submission
  /// from `self` to `next`. Only decisions reach `Accept` or `Reject`, and
  /// they do not consult this.
  pub fn can_transition_to(self, next: SubmissionStatus) -> bool {
    use SubmissionStatus::*;
    matches!(
      (self, next),
      (Submitted, UnderReview) | (Accept, CameraReady)
    )
  }
}

impl fmt::Display for SubmissionStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for SubmissionStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    SubmissionStatus::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| Error::InvalidArgument(format!("unknown submission status: {s:?}")))
  }
}

// ─── Decision ────────────────────────────────────────────────────────────────

/// A chair's verdict on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
  Accept,
  Reject,
}

impl FromStr for Decision {
  type Err = Error;

  /// Case-insensitive: `"accept"`, `"ACCEPT"` and `"Accept"` all parse.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.eq_ignore_ascii_case("accept") {
      Ok(Decision::Accept)
    } else if s.eq_ignore_ascii_case("reject") {
      Ok(Decision::Reject)
    } else {
      Err(Error::InvalidArgument(format!(
        "invalid decision {s:?}: expected \"accept\" or \"reject\""
      )))
    }
  }
}

impl From<Decision> for SubmissionStatus {
  fn from(d: Decision) -> Self {
    match d {
      Decision::Accept => SubmissionStatus::Accept,
      Decision::Reject => SubmissionStatus::Reject,
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:            i64,
  pub email:         String,
  pub role:          Role,
  /// Argon2 PHC string. Never leaves the server.
  #[serde(skip_serializing, default)]
  pub password_hash: String,
}

/// Input for [`ConferenceStore::add_user`](crate::store::ConferenceStore::add_user).
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub role:          Role,
  pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
  pub id:            i64,
  pub title:         String,
  pub author_id:     Option<i64>,
  pub status:        SubmissionStatus,
  /// Set by the most recent chair decision; `None` until one is made.
  pub decision_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
  pub title:     String,
  pub author_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
  pub id:            i64,
  pub submission_id: i64,
  pub reviewer_id:   i64,
  pub score:         i64,
  pub comment:       String,
  /// Server-assigned at insertion.
  pub created_at:    DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
  pub submission_id: i64,
  pub reviewer_id:   i64,
  pub score:         i64,
  pub comment:       String,
}

/// The `{id, status}` pair returned by a status lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
  pub id:     i64,
  pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decision_parse_ignores_case() {
    assert_eq!("accept".parse::<Decision>().unwrap(), Decision::Accept);
    assert_eq!("ACCEPT".parse::<Decision>().unwrap(), Decision::Accept);
    assert_eq!("Reject".parse::<Decision>().unwrap(), Decision::Reject);
  }

  #[test]
  fn decision_parse_rejects_other_values() {
    for bad in ["maybe", "", " accept", "accepted", "revise"] {
      assert!(
        matches!(bad.parse::<Decision>(), Err(Error::InvalidArgument(_))),
        "{bad:?} should not parse"
      );
    }
  }

  #[test]
  fn status_wire_names_match_serde() {
    for status in SubmissionStatus::ALL {
      let json = serde_json::to_string(&status).unwrap();
      assert_eq!(json, format!("\"{}\"", status.as_str()));
      assert_eq!(status.as_str().parse::<SubmissionStatus>().unwrap(), status);
    }
  }

  #[test]
  fn only_accepted_submissions_become_camera_ready() {
    use SubmissionStatus::*;
    for from in SubmissionStatus::ALL {
      assert_eq!(from.can_transition_to(CameraReady), from == Accept, "{from}");
    }
  }

  #[test]
  fn intake_never_reaches_a_decision() {
    for from in SubmissionStatus::ALL {
      assert!(!from.can_transition_to(SubmissionStatus::Accept), "{from}");
      assert!(!from.can_transition_to(SubmissionStatus::Reject), "{from}");
    }
    assert!(SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::UnderReview));
    assert!(!SubmissionStatus::UnderReview.can_transition_to(SubmissionStatus::Submitted));
  }

  #[test]
  fn decided_statuses() {
    use SubmissionStatus::*;
    assert!(!Submitted.is_decided());
    assert!(!UnderReview.is_decided());
    assert!(Accept.is_decided());
    assert!(Reject.is_decided());
    assert!(CameraReady.is_decided());
  }

  #[test]
  fn role_round_trips_through_text() {
    for role in [Role::Author, Role::Reviewer, Role::Chair] {
      assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
    }
    assert!("admin".parse::<Role>().is_err());
  }
}

//! In-memory [`ConferenceStore`] used by this crate's unit tests.

use std::{collections::BTreeMap, convert::Infallible, sync::Mutex};

use chrono::{DateTime, Utc};

use crate::{
  model::{
    NewReview, NewSubmission, NewUser, Review, Role, Submission, SubmissionStatus, User,
  },
  store::ConferenceStore,
};

#[derive(Default)]
struct State {
  next_id:     i64,
  users:       BTreeMap<i64, User>,
  submissions: BTreeMap<i64, Submission>,
  reviews:     Vec<Review>,
  /// Number of mutations applied to submissions or reviews.
  writes:      usize,
}

impl State {
  fn next_id(&mut self) -> i64 {
    self.next_id += 1;
    self.next_id
  }
}

#[derive(Default)]
pub struct MemoryStore {
  state: Mutex<State>,
}

pub fn user(id: i64, role: Role) -> User {
  User {
    id,
    email: format!("user{id}@example.org"),
    role,
    password_hash: String::new(),
  }
}

impl MemoryStore {
  /// A store holding one `Submitted` submission per title.
  pub fn with_submissions(titles: &[&str]) -> (Self, Vec<i64>) {
    let store = Self::default();
    let ids = {
      let mut state = store.state.lock().unwrap();
      titles
        .iter()
        .map(|title| {
          let id = state.next_id();
          state.submissions.insert(id, Submission {
            id,
            title: (*title).to_owned(),
            author_id: None,
            status: SubmissionStatus::Submitted,
            decision_date: None,
          });
          id
        })
        .collect()
    };
    (store, ids)
  }

  /// Force a submission into `status`, bypassing the engine.
  pub fn set_status(&self, id: i64, status: SubmissionStatus) {
    let mut state = self.state.lock().unwrap();
    let sub = state.submissions.get_mut(&id).expect("submission exists");
    sub.status = status;
    sub.decision_date = status.is_decided().then(Utc::now);
  }

  pub fn submission(&self, id: i64) -> Submission {
    self.state.lock().unwrap().submissions[&id].clone()
  }

  pub fn writes(&self) -> usize { self.state.lock().unwrap().writes }
}

impl ConferenceStore for MemoryStore {
  type Error = Infallible;

  async fn add_user(&self, input: NewUser) -> Result<User, Infallible> {
    let mut state = self.state.lock().unwrap();
    let user = User {
      id:            state.next_id(),
      email:         input.email,
      role:          input.role,
      password_hash: input.password_hash,
    };
    state.users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>, Infallible> {
    Ok(self.state.lock().unwrap().users.get(&id).cloned())
  }

  async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, Infallible> {
    let state = self.state.lock().unwrap();
    Ok(state.users.values().find(|u| u.email == email).cloned())
  }

  async fn add_submission(&self, input: NewSubmission) -> Result<Submission, Infallible> {
    let mut state = self.state.lock().unwrap();
    let submission = Submission {
      id:            state.next_id(),
      title:         input.title,
      author_id:     input.author_id,
      status:        SubmissionStatus::Submitted,
      decision_date: None,
    };
    state.submissions.insert(submission.id, submission.clone());
    state.writes += 1;
    Ok(submission)
  }

  async fn get_submission(&self, id: i64) -> Result<Option<Submission>, Infallible> {
    Ok(self.state.lock().unwrap().submissions.get(&id).cloned())
  }

  async fn list_submissions(
    &self,
    status: Option<SubmissionStatus>,
  ) -> Result<Vec<Submission>, Infallible> {
    let state = self.state.lock().unwrap();
    Ok(
      state
        .submissions
        .values()
        .filter(|s| status.is_none_or(|wanted| s.status == wanted))
        .cloned()
        .collect(),
    )
  }

  async fn record_decision(
    &self,
    id: i64,
    status: SubmissionStatus,
    decided_at: DateTime<Utc>,
  ) -> Result<Option<Submission>, Infallible> {
    let mut state = self.state.lock().unwrap();
    let Some(sub) = state.submissions.get_mut(&id) else {
      return Ok(None);
    };
    sub.status = status;
    sub.decision_date = Some(decided_at);
    let updated = sub.clone();
    state.writes += 1;
    Ok(Some(updated))
  }

  async fn transition_status(
    &self,
    id: i64,
    from: SubmissionStatus,
    to: SubmissionStatus,
  ) -> Result<Option<Submission>, Infallible> {
    let mut state = self.state.lock().unwrap();
    let Some(sub) = state.submissions.get_mut(&id).filter(|s| s.status == from) else {
      return Ok(None);
    };
    sub.status = to;
    let updated = sub.clone();
    state.writes += 1;
    Ok(Some(updated))
  }

  async fn record_review(&self, input: NewReview) -> Result<Option<Review>, Infallible> {
    let mut state = self.state.lock().unwrap();
    let id = state.next_id();
    let Some(sub) = state.submissions.get_mut(&input.submission_id) else {
      return Ok(None);
    };
    if sub.status == SubmissionStatus::Submitted {
      sub.status = SubmissionStatus::UnderReview;
    }
    let review = Review {
      id,
      submission_id: input.submission_id,
      reviewer_id:   input.reviewer_id,
      score:         input.score,
      comment:       input.comment,
      created_at:    Utc::now(),
    };
    state.reviews.push(review.clone());
    state.writes += 1;
    Ok(Some(review))
  }

  async fn list_reviews(&self, submission_id: i64) -> Result<Vec<Review>, Infallible> {
    let state = self.state.lock().unwrap();
    Ok(
      state
        .reviews
        .iter()
        .filter(|r| r.submission_id == submission_id)
        .cloned()
        .collect(),
    )
  }
}

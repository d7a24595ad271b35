//! In-memory store implementations backing the capability traits

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use triage_core::{DoctorRecord, SymptomAnalysisResult};

use super::{ChatTurn, ChatWindow, ConversationStore, DoctorDirectory, StoreError};

/// Display name a window carries until an analysis names it
const DEFAULT_WINDOW_NAME: &str = "Symptom Chat";

#[derive(Default)]
struct Conversations {
    windows: HashMap<String, ChatWindow>,
    turns: HashMap<String, Vec<ChatTurn>>,
}

/// Conversation store backed by process memory.
///
/// Appends take the write lock, so individual turns are atomic; turn order
/// within a window is insertion order.
#[derive(Default)]
pub struct InMemoryConversationStore {
    inner: RwLock<Conversations>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get_or_create_window(
        &self,
        user_id: &str,
        window_id: &str,
    ) -> Result<ChatWindow, StoreError> {
        let mut inner = self.inner.write().await;
        let window = inner
            .windows
            .entry(window_id.to_string())
            .or_insert_with(|| ChatWindow {
                window_id: window_id.to_string(),
                user_id: user_id.to_string(),
                display_name: DEFAULT_WINDOW_NAME.to_string(),
                created_at: Utc::now(),
            });
        Ok(window.clone())
    }

    async fn append_turn(
        &self,
        window_id: &str,
        user_id: &str,
        user_message: &str,
        bot_response: &str,
    ) -> Result<ChatTurn, StoreError> {
        let turn = ChatTurn {
            id: Uuid::new_v4(),
            window_id: window_id.to_string(),
            user_id: user_id.to_string(),
            user_message: user_message.to_string(),
            bot_response: bot_response.to_string(),
            analysis: None,
            timestamp: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner
            .turns
            .entry(window_id.to_string())
            .or_default()
            .push(turn.clone());
        Ok(turn)
    }

    async fn list_turns(&self, window_id: &str) -> Result<Vec<ChatTurn>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.turns.get(window_id).cloned().unwrap_or_default())
    }

    async fn set_turn_analysis(
        &self,
        turn_id: Uuid,
        analysis: &SymptomAnalysisResult,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for turns in inner.turns.values_mut() {
            if let Some(turn) = turns.iter_mut().find(|t| t.id == turn_id) {
                turn.analysis = Some(analysis.clone());
                return Ok(());
            }
        }
        Err(StoreError::TurnNotFound(turn_id))
    }

    async fn rename_window(&self, window_id: &str, new_name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(window) = inner.windows.get_mut(window_id) {
            window.display_name = new_name.to_string();
        }
        Ok(())
    }

    async fn delete_window(&self, window_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.windows.remove(window_id);
        inner.turns.remove(window_id);
        Ok(())
    }
}

/// Doctor directory backed by a fixed in-process list
#[derive(Default)]
pub struct InMemoryDoctorDirectory {
    doctors: Vec<DoctorRecord>,
}

impl InMemoryDoctorDirectory {
    pub fn new(doctors: Vec<DoctorRecord>) -> Self {
        Self { doctors }
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn find_by_specialties(
        &self,
        specialties: &[String],
    ) -> Result<Vec<DoctorRecord>, StoreError> {
        if specialties.is_empty() {
            return Ok(Vec::new());
        }

        let wanted: Vec<String> = specialties.iter().map(|s| s.to_lowercase()).collect();
        Ok(self
            .doctors
            .iter()
            .filter(|doctor| {
                let stored = doctor.specialty.to_lowercase();
                wanted.iter().any(|w| stored.contains(w))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(name: &str, specialty: &str) -> DoctorRecord {
        DoctorRecord {
            name: name.to_string(),
            specialty: specialty.to_string(),
            contact: format!("{}@clinic.example", name.to_lowercase()),
            location: "Main Street Clinic".to_string(),
        }
    }

    fn directory() -> InMemoryDoctorDirectory {
        InMemoryDoctorDirectory::new(vec![
            doctor("Adams", "Cardiologist"),
            doctor("Baker", "Dermatologist"),
            doctor("Chen", "Interventional Cardiologist"),
        ])
    }

    #[tokio::test]
    async fn empty_specialty_list_matches_nothing() {
        let found = directory().find_by_specialties(&[]).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn match_is_case_insensitive_substring() {
        let found = directory()
            .find_by_specialties(&["cardiologist".to_string()])
            .await
            .unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Adams", "Chen"]);
    }

    #[tokio::test]
    async fn specialties_combine_with_or() {
        let found = directory()
            .find_by_specialties(&["Dermatologist".to_string(), "Cardiologist".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn doctor_matching_twice_appears_once() {
        let found = directory()
            .find_by_specialties(&["Cardio".to_string(), "Cardiologist".to_string()])
            .await
            .unwrap();
        let adams = found.iter().filter(|d| d.name == "Adams").count();
        assert_eq!(adams, 1);
    }

    #[tokio::test]
    async fn unmatched_specialty_yields_empty() {
        let found = directory()
            .find_by_specialties(&["Podiatrist".to_string()])
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn turns_are_listed_in_insertion_order() {
        let store = InMemoryConversationStore::new();
        store.get_or_create_window("u1", "w1").await.unwrap();
        for i in 0..3 {
            store
                .append_turn("w1", "u1", &format!("msg {i}"), &format!("reply {i}"))
                .await
                .unwrap();
        }

        let turns = store.list_turns("w1").await.unwrap();
        let messages: Vec<&str> = turns.iter().map(|t| t.user_message.as_str()).collect();
        assert_eq!(messages, vec!["msg 0", "msg 1", "msg 2"]);
        assert!(turns.iter().all(|t| t.analysis.is_none()));
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = InMemoryConversationStore::new();
        let first = store.get_or_create_window("u1", "w1").await.unwrap();
        let second = store.get_or_create_window("u1", "w1").await.unwrap();
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(first.display_name, DEFAULT_WINDOW_NAME);
    }

    #[tokio::test]
    async fn set_analysis_mutates_only_that_turn() {
        let store = InMemoryConversationStore::new();
        store.get_or_create_window("u1", "w1").await.unwrap();
        store.append_turn("w1", "u1", "a", "b").await.unwrap();
        let target = store.append_turn("w1", "u1", "c", "d").await.unwrap();

        let analysis = SymptomAnalysisResult::from_extracted(
            triage_core::ExtractedAnalysis::zero_value(),
            Vec::new(),
        );
        store.set_turn_analysis(target.id, &analysis).await.unwrap();

        let turns = store.list_turns("w1").await.unwrap();
        assert!(turns[0].analysis.is_none());
        assert!(turns[1].analysis.is_some());
    }

    #[tokio::test]
    async fn set_analysis_on_unknown_turn_errors() {
        let store = InMemoryConversationStore::new();
        let analysis = SymptomAnalysisResult::from_extracted(
            triage_core::ExtractedAnalysis::zero_value(),
            Vec::new(),
        );
        let result = store.set_turn_analysis(Uuid::new_v4(), &analysis).await;
        assert!(matches!(result, Err(StoreError::TurnNotFound(_))));
    }

    #[tokio::test]
    async fn delete_window_is_idempotent_and_cascades() {
        let store = InMemoryConversationStore::new();
        store.get_or_create_window("u1", "w1").await.unwrap();
        store.append_turn("w1", "u1", "a", "b").await.unwrap();

        store.delete_window("w1").await.unwrap();
        assert!(store.list_turns("w1").await.unwrap().is_empty());

        // Second delete of the same window still succeeds
        store.delete_window("w1").await.unwrap();
        // As does deleting a window that never existed
        store.delete_window("never-existed").await.unwrap();
    }
}

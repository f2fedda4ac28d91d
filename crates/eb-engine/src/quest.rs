//! Quest tracking: availability, progress, exactly-once completion.

use std::collections::{HashMap, HashSet};

use eb_core::{QuestEventKind, QuestRecord, RewardRecord};

/// A single live objective.
#[derive(Debug, Clone)]
pub struct Objective {
    /// Event kind that satisfies this objective.
    pub kind: QuestEventKind,
    /// Event target that satisfies this objective.
    pub target: String,
    /// Player-facing objective text.
    pub description: String,
    /// Whether a matching event has occurred.
    pub completed: bool,
}

/// A quest the player has started.
#[derive(Debug, Clone)]
pub struct Quest {
    /// Quest id.
    pub id: String,
    /// Player-facing title.
    pub title: String,
    /// Player-facing description.
    pub description: String,
    /// Live objectives.
    pub objectives: Vec<Objective>,
    /// Reward bundle granted on completion.
    pub rewards: RewardRecord,
    /// Follow-up quest suggested on completion.
    pub next_quest: Option<String>,
}

impl Quest {
    fn from_record(id: &str, record: &QuestRecord) -> Self {
        Self {
            id: id.to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            objectives: record
                .objectives
                .iter()
                .map(|o| Objective {
                    kind: o.kind,
                    target: o.target.clone(),
                    description: o.description.clone(),
                    completed: false,
                })
                .collect(),
            rewards: record.rewards.clone(),
            next_quest: record.next_quest.clone(),
        }
    }

    /// Whether every objective is satisfied.
    pub fn is_complete(&self) -> bool {
        self.objectives.iter().all(|o| o.completed)
    }

    /// Count of satisfied objectives.
    pub fn completed_objectives(&self) -> usize {
        self.objectives.iter().filter(|o| o.completed).count()
    }
}

/// A quest that just completed, with its reward bundle.
#[derive(Debug, Clone)]
pub struct CompletedQuest {
    /// Quest id.
    pub id: String,
    /// Player-facing title.
    pub title: String,
    /// Reward bundle to apply.
    pub rewards: RewardRecord,
    /// Follow-up quest suggested by the definition.
    pub next_quest: Option<String>,
}

/// Why a quest could not be started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartQuestError {
    /// No quest with that id exists.
    #[error("There is no quest by that name.")]
    Unknown,
    /// The quest is already in the active set.
    #[error("That quest is already underway.")]
    AlreadyActive,
    /// The quest was already completed.
    #[error("You have already completed that quest.")]
    AlreadyCompleted,
    /// Not every prerequisite quest has been completed.
    #[error("You are not ready for that quest yet.")]
    PrerequisitesUnmet,
}

/// The player's quest book.
#[derive(Debug, Clone)]
pub struct QuestLog {
    catalog: HashMap<String, QuestRecord>,
    active: HashMap<String, Quest>,
    completed: HashSet<String>,
}

impl QuestLog {
    /// Build a quest log over the content catalog.
    pub fn new(catalog: HashMap<String, QuestRecord>) -> Self {
        Self {
            catalog,
            active: HashMap::new(),
            completed: HashSet::new(),
        }
    }

    /// Quest ids the player could start right now, sorted.
    pub fn available(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .catalog
            .iter()
            .filter(|(id, record)| {
                !self.active.contains_key(*id)
                    && !self.completed.contains(*id)
                    && record
                        .prerequisites
                        .iter()
                        .all(|p| self.completed.contains(p))
            })
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Start a quest if it is available.
    pub fn start(&mut self, id: &str) -> Result<&Quest, StartQuestError> {
        if self.active.contains_key(id) {
            return Err(StartQuestError::AlreadyActive);
        }
        if self.completed.contains(id) {
            return Err(StartQuestError::AlreadyCompleted);
        }
        let record = self.catalog.get(id).ok_or(StartQuestError::Unknown)?;
        if !record.prerequisites.iter().all(|p| self.completed.contains(p)) {
            return Err(StartQuestError::PrerequisitesUnmet);
        }

        let quest = Quest::from_record(id, record);
        self.active.insert(id.to_string(), quest);
        // Just inserted under this key.
        self.active.get(id).ok_or(StartQuestError::Unknown)
    }

    /// Record a world event and return every quest it completed.
    ///
    /// Completion is exactly-once: a finished quest moves to the completed
    /// set, so re-firing the same event later is a no-op.
    pub fn record_event(&mut self, kind: QuestEventKind, target: &str) -> Vec<CompletedQuest> {
        let mut finished: Vec<String> = Vec::new();

        for (id, quest) in &mut self.active {
            let mut updated = false;
            for objective in &mut quest.objectives {
                if !objective.completed && objective.kind == kind && objective.target == target {
                    objective.completed = true;
                    updated = true;
                }
            }
            if updated && quest.is_complete() {
                finished.push(id.clone());
            }
        }

        finished.sort_unstable();
        finished
            .into_iter()
            .filter_map(|id| {
                let quest = self.active.remove(&id)?;
                self.completed.insert(id.clone());
                Some(CompletedQuest {
                    id,
                    title: quest.title,
                    rewards: quest.rewards,
                    next_quest: quest.next_quest,
                })
            })
            .collect()
    }

    /// Active quests, sorted by id.
    pub fn active(&self) -> Vec<&Quest> {
        let mut quests: Vec<&Quest> = self.active.values().collect();
        quests.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        quests
    }

    /// Look up an active quest.
    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.active.get(id)
    }

    /// Look up a quest definition in the catalog.
    pub fn definition(&self, id: &str) -> Option<&QuestRecord> {
        self.catalog.get(id)
    }

    /// Whether a quest has been completed.
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }
}

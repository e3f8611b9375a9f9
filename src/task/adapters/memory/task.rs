//! In-memory task backend.
//!
//! Applies the same transitions the remote backend does, so services and the
//! CLI can run without a server. The caller is whoever holds the injected
//! [`SessionHandle`]; calls without a session fail as unauthenticated.

use async_trait::async_trait;
use mockable::Clock;
use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::{
    api::{ApiError, ApiResult},
    session::SessionHandle,
    task::{
        domain::{
            Approval, Attachment, CreateTaskRequest, Priority, RemarkKind, SortOrder, Task,
            TaskDomainError, TaskId, TaskQuery, TaskStage, TaskStatus, UpdateTaskRequest,
            UploadFile, UserId, UserRef,
        },
        ports::{Pagination, TaskApi, TaskPage},
    },
};

const DEFAULT_PAGE_SIZE: u32 = 10;

/// Thread-safe in-memory task backend.
pub struct InMemoryTaskApi<C>
where
    C: Clock + Send + Sync,
{
    session: SessionHandle,
    clock: Arc<C>,
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    users: HashMap<UserId, UserRef>,
}

impl<C> Clone for InMemoryTaskApi<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskApi<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskApi")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn poisoned(err: impl ToString) -> ApiError {
    ApiError::transport(std::io::Error::other(err.to_string()))
}

fn rejected(err: &TaskDomainError) -> ApiError {
    ApiError::bad_request(err.to_string())
}

fn not_found(id: &TaskId) -> ApiError {
    ApiError::not_found(format!("Task not found: {id}"))
}

impl<C> InMemoryTaskApi<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty backend.
    #[must_use]
    pub fn new(session: SessionHandle, clock: Arc<C>) -> Self {
        Self {
            session,
            clock,
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
        }
    }

    /// Registers a user so assignments carry their name and email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when lock acquisition fails.
    pub fn add_user(&self, user: UserRef) -> ApiResult<()> {
        let Some(id) = user.id.clone() else {
            return Err(ApiError::bad_request("user reference has no id"));
        };
        self.state.write().map_err(poisoned)?.users.insert(id, user);
        Ok(())
    }

    /// Inserts a task as-is, replacing any task with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when lock acquisition fails.
    pub fn seed(&self, task: Task) -> ApiResult<()> {
        self.state
            .write()
            .map_err(poisoned)?
            .tasks
            .insert(task.id().clone(), task);
        Ok(())
    }

    fn caller(&self) -> ApiResult<UserRef> {
        self.session
            .user()
            .map(|user| user.as_user_ref())
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_owned()))
    }

    fn resolve(state: &InMemoryTaskState, ids: &[UserId]) -> Vec<UserRef> {
        ids.iter()
            .map(|id| {
                state
                    .users
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| UserRef::from_id(id.clone()))
            })
            .collect()
    }

    /// Applies `change` to a live task and returns the result.
    fn mutate<F>(&self, id: &TaskId, change: F) -> ApiResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> ApiResult<()>,
    {
        self.caller()?;
        let mut state = self.state.write().map_err(poisoned)?;
        let task = state
            .tasks
            .get_mut(id)
            .filter(|task| !task.is_deleted())
            .ok_or_else(|| not_found(id))?;
        change(task, &*self.clock)?;
        Ok(task.clone())
    }
}

fn matches(task: &Task, query: &TaskQuery) -> bool {
    if task.is_deleted() {
        return false;
    }
    let search = query
        .search
        .as_deref()
        .map(|text| text.trim().to_lowercase())
        .filter(|text| !text.is_empty());
    query.status.is_none_or(|status| task.status() == status)
        && query.priority.is_none_or(|priority| task.priority() == priority)
        && query.stage.is_none_or(|stage| task.stage() == stage)
        && query
            .assigned_to
            .as_ref()
            .is_none_or(|user| task.is_assigned_to(user))
        && query.created_by.as_ref().is_none_or(|user| {
            task.created_by()
                .and_then(|creator| creator.id.as_ref())
                == Some(user)
        })
        && search.is_none_or(|text| {
            task.title().to_lowercase().contains(&text)
                || task.description().to_lowercase().contains(&text)
        })
        && query
            .start_date
            .is_none_or(|start| task.created_at().is_some_and(|at| at >= start))
        && query
            .end_date
            .is_none_or(|end| task.created_at().is_some_and(|at| at <= end))
}

const fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Low => 0,
        Priority::Medium => 1,
        Priority::High => 2,
        Priority::Urgent => 3,
    }
}

fn compare(left: &Task, right: &Task, field: &str) -> Ordering {
    match field {
        "title" => left.title().cmp(right.title()),
        "priority" => priority_rank(left.priority()).cmp(&priority_rank(right.priority())),
        "deadline" => left.deadline().cmp(&right.deadline()),
        "updatedAt" => left.updated_at().cmp(&right.updated_at()),
        _ => left.created_at().cmp(&right.created_at()),
    }
    .then_with(|| left.id().cmp(right.id()))
}

fn paginate(mut tasks: Vec<Task>, query: &TaskQuery) -> TaskPage {
    let field = query.sort_by.as_deref().unwrap_or("createdAt");
    tasks.sort_by(|left, right| compare(left, right, field));
    if query.sort_order.unwrap_or_default() == SortOrder::Desc {
        tasks.reverse();
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let total = u64::try_from(tasks.len()).unwrap_or(u64::MAX);
    let pages = u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX);
    let skip = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);

    TaskPage {
        tasks: tasks.into_iter().skip(skip).take(take).collect(),
        pagination: Some(Pagination {
            page,
            limit,
            total,
            pages,
        }),
    }
}

fn stored_attachment(file: &UploadFile) -> Attachment {
    let filename = format!("{}-{}", Uuid::new_v4().simple(), file.name);
    Attachment {
        path: format!("uploads/{filename}"),
        filename,
        original_name: Some(file.name.clone()),
        size: file.size(),
        mimetype: file.mimetype.clone(),
    }
}

#[async_trait]
impl<C> TaskApi for InMemoryTaskApi<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self, query: &TaskQuery) -> ApiResult<TaskPage> {
        self.caller()?;
        let state = self.state.read().map_err(poisoned)?;
        let found = state
            .tasks
            .values()
            .filter(|task| matches(task, query))
            .cloned()
            .collect();
        Ok(paginate(found, query))
    }

    async fn get(&self, id: &TaskId) -> ApiResult<Task> {
        self.caller()?;
        let state = self.state.read().map_err(poisoned)?;
        state
            .tasks
            .get(id)
            .filter(|task| !task.is_deleted())
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, request: &CreateTaskRequest) -> ApiResult<Task> {
        let creator = self.caller()?;
        request.validate().map_err(|err| rejected(&err))?;
        let id = TaskId::new(format!("task-{}", Uuid::new_v4().simple()))
            .map_err(|err| rejected(&err))?;

        let mut state = self.state.write().map_err(poisoned)?;
        let assignees = Self::resolve(&state, request.assignees());
        let mut task = Task::new(id.clone(), request, Some(creator), &*self.clock);
        task.assign(assignees, &*self.clock);
        let uploads: Vec<Attachment> = request.attachments().iter().map(stored_attachment).collect();
        if !uploads.is_empty() {
            task.add_attachments(uploads, &*self.clock)
                .map_err(|err| rejected(&err))?;
        }
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, changes: &UpdateTaskRequest) -> ApiResult<Task> {
        changes.validate().map_err(|err| rejected(&err))?;
        self.mutate(id, |task, clock| {
            task.apply_update(changes, clock);
            Ok(())
        })
    }

    async fn delete(&self, id: &TaskId) -> ApiResult<()> {
        self.mutate(id, |task, clock| {
            task.mark_deleted(clock);
            Ok(())
        })
        .map(|_| ())
    }

    async fn assign(&self, id: &TaskId, assignees: &[UserId]) -> ApiResult<Task> {
        let users = {
            let state = self.state.read().map_err(poisoned)?;
            Self::resolve(&state, assignees)
        };
        self.mutate(id, |task, clock| {
            task.assign(users, clock);
            Ok(())
        })
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> ApiResult<Task> {
        self.mutate(id, |task, clock| {
            task.set_status(status, clock);
            Ok(())
        })
    }

    async fn update_stage(&self, id: &TaskId, stage: TaskStage) -> ApiResult<Task> {
        self.mutate(id, |task, clock| {
            task.set_stage(stage, clock);
            Ok(())
        })
    }

    async fn update_individual_stage(
        &self,
        id: &TaskId,
        user_id: &UserId,
        stage: TaskStage,
    ) -> ApiResult<Task> {
        self.mutate(id, |task, clock| {
            task.set_individual_stage(user_id, stage, clock)
                .map_err(|err| rejected(&err))
        })
    }

    async fn update_individual_approval(
        &self,
        id: &TaskId,
        user_id: &UserId,
        approval: Approval,
    ) -> ApiResult<Task> {
        self.mutate(id, |task, clock| {
            task.set_individual_approval(user_id, approval, clock)
                .map_err(|err| rejected(&err))
        })
    }

    async fn add_remark(&self, id: &TaskId, kind: RemarkKind, text: &str) -> ApiResult<Task> {
        let author = self.caller()?;
        self.mutate(id, |task, clock| {
            task.add_remark(kind, text, Some(author), clock)
                .map_err(|err| rejected(&err))
        })
    }

    async fn add_attachments(&self, id: &TaskId, files: &[UploadFile]) -> ApiResult<Task> {
        let uploads: Vec<Attachment> = files.iter().map(stored_attachment).collect();
        self.mutate(id, |task, clock| {
            task.add_attachments(uploads, clock)
                .map_err(|err| rejected(&err))
        })
    }
}

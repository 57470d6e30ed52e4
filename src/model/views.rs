//! Joining views over repeatable settings
//!
//! Before Robot Framework 3.0 settings such as `Force Tags` could appear more
//! than once. A [`SettingGroup`] keeps every occurrence as read from the
//! file and a [`SettingView`] presents them as one setting. Reads combine the
//! occurrences on the fly; the first write collapses them into a single
//! element. The collapse happens under a write lock and is idempotent, so
//! concurrent readers racing to mutate cannot join twice.

use std::fmt;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use smol_str::SmolStr;
use tracing::debug;

use super::element::{ModelElement, ModelError};
use super::model_type::SettingKind;
use crate::base::RobotVersion;
use crate::parser::RobotToken;

/// Backing store of a [`SettingGroup`].
#[derive(Clone)]
enum JoinState {
    /// Occurrences as parsed, in file order
    Unjoined(Vec<ModelElement>),
    /// The single merged element
    Joined(ModelElement),
}

/// All occurrences of one repeatable setting.
pub struct SettingGroup {
    kind: SettingKind,
    state: RwLock<JoinState>,
}

impl SettingGroup {
    pub fn new(kind: SettingKind) -> Self {
        Self {
            kind,
            state: RwLock::new(JoinState::Unjoined(Vec::new())),
        }
    }

    pub fn kind(&self) -> SettingKind {
        self.kind
    }

    /// Occurrences in file order; a single element once joined
    pub fn elements(&self) -> MappedRwLockReadGuard<'_, [ModelElement]> {
        RwLockReadGuard::map(self.state.read(), |state| match state {
            JoinState::Unjoined(elements) => elements.as_slice(),
            JoinState::Joined(element) => std::slice::from_ref(element),
        })
    }

    pub fn len(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    pub fn is_joined(&self) -> bool {
        matches!(&*self.state.read(), JoinState::Joined(_))
    }

    /// Add an occurrence. A joined group becomes unjoined again.
    pub fn push(&mut self, element: ModelElement) {
        let mut elements = self.take_elements();
        elements.push(element);
        *self.state.get_mut() = JoinState::Unjoined(elements);
    }

    /// Remove the occurrence at `index`
    pub fn remove(&mut self, index: usize) -> Result<ModelElement, ModelError> {
        let mut elements = self.take_elements();
        let len = elements.len();
        let removed = (index < len).then(|| elements.remove(index));
        *self.state.get_mut() = JoinState::Unjoined(elements);
        removed.ok_or(ModelError::IndexOutOfBounds { index, len })
    }

    fn take_elements(&mut self) -> Vec<ModelElement> {
        match std::mem::replace(self.state.get_mut(), JoinState::Unjoined(Vec::new())) {
            JoinState::Unjoined(elements) => elements,
            JoinState::Joined(joined) => vec![joined],
        }
    }

    /// Mutable access to the occurrences without joining
    pub(crate) fn elements_mut(&mut self) -> &mut [ModelElement] {
        match self.state.get_mut() {
            JoinState::Unjoined(elements) => elements.as_mut_slice(),
            JoinState::Joined(element) => std::slice::from_mut(element),
        }
    }

    /// Collapse the occurrences into one element.
    ///
    /// Values and comments are concatenated in file order into a new element
    /// carrying the first declaration. An empty group gets a fresh element
    /// spelled for `version`. Calling it again is a no-op.
    pub fn join(&self, version: &RobotVersion) {
        let mut state = self.state.write();
        joined_mut(&mut state, self.kind, version);
    }

    /// Join, then run `update` on the single element.
    pub fn update<R>(&self, version: &RobotVersion, update: impl FnOnce(&mut ModelElement) -> R) -> R {
        let mut state = self.state.write();
        update(joined_mut(&mut state, self.kind, version))
    }

    /// The element a join would produce, without joining
    fn preview(&self, version: &RobotVersion) -> ModelElement {
        match &*self.state.read() {
            JoinState::Joined(element) => element.clone(),
            JoinState::Unjoined(elements) => join_elements(self.kind, elements.clone(), version),
        }
    }
}

fn joined_mut<'s>(
    state: &'s mut JoinState,
    kind: SettingKind,
    version: &RobotVersion,
) -> &'s mut ModelElement {
    if let JoinState::Unjoined(elements) = state {
        let elements = std::mem::take(elements);
        debug!(?kind, count = elements.len(), "joining setting occurrences");
        *state = JoinState::Joined(join_elements(kind, elements, version));
    }
    match state {
        JoinState::Joined(element) => element,
        JoinState::Unjoined(_) => unreachable!("state was joined above"),
    }
}

fn join_elements(kind: SettingKind, elements: Vec<ModelElement>, version: &RobotVersion) -> ModelElement {
    let mut iter = elements.into_iter();
    let Some(first) = iter.next() else {
        return ModelElement::create(kind.model_type(), version);
    };
    let rest: Vec<ModelElement> = iter.collect();
    if rest.is_empty() {
        return first;
    }

    let mut values = first.values().to_vec();
    let mut comments = first.comments().to_vec();
    for element in &rest {
        values.extend_from_slice(element.values());
        comments.extend_from_slice(element.comments());
    }
    ModelElement::from_parts(
        first.model_type(),
        first.declaration().clone(),
        values,
        None,
        comments,
    )
}

impl Clone for SettingGroup {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            state: RwLock::new(self.state.read().clone()),
        }
    }
}

impl fmt::Debug for SettingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingGroup")
            .field("kind", &self.kind)
            .field("joined", &self.is_joined())
            .field("elements", &&*self.elements())
            .finish()
    }
}

/// One logical setting over a [`SettingGroup`].
///
/// Created per query; reads never join, writes join first.
pub struct SettingView<'a> {
    group: &'a SettingGroup,
    version: RobotVersion,
}

impl<'a> SettingView<'a> {
    pub fn new(group: &'a SettingGroup, version: RobotVersion) -> Self {
        Self { group, version }
    }

    pub fn kind(&self) -> SettingKind {
        self.group.kind()
    }

    /// Whether the setting is declared at least once
    pub fn is_present(&self) -> bool {
        !self.group.is_empty()
    }

    pub fn is_joined(&self) -> bool {
        self.group.is_joined()
    }

    pub fn declaration(&self) -> Option<RobotToken> {
        self.group.elements().first().map(|e| e.declaration().clone())
    }

    pub fn values(&self) -> Vec<RobotToken> {
        self.group
            .elements()
            .iter()
            .flat_map(|e| e.values().iter().cloned())
            .collect()
    }

    pub fn name(&self) -> Option<RobotToken> {
        self.group.preview(&self.version).name().cloned()
    }

    pub fn arguments(&self) -> Vec<RobotToken> {
        self.group.preview(&self.version).arguments().to_vec()
    }

    pub fn tags(&self) -> Result<Vec<RobotToken>, ModelError> {
        let preview = self.group.preview(&self.version);
        preview.tags().map(<[RobotToken]>::to_vec)
    }

    pub fn comments(&self) -> Vec<RobotToken> {
        self.group
            .elements()
            .iter()
            .flat_map(|e| e.comments().iter().cloned())
            .collect()
    }

    pub fn add_tag(&self, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        self.group.update(&self.version, |e| e.add_tag(text))
    }

    pub fn set_tag(&self, index: usize, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        self.group.update(&self.version, |e| e.set_tag(index, text))
    }

    pub fn remove_tag(&self, index: usize) -> Result<RobotToken, ModelError> {
        self.group.update(&self.version, |e| e.remove_tag(index))
    }

    pub fn set_name(&self, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        self.group.update(&self.version, |e| e.set_name(text))
    }

    pub fn set_argument(&self, index: usize, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        self.group.update(&self.version, |e| e.set_argument(index, text))
    }

    pub fn add_argument(&self, text: impl Into<SmolStr>) -> Result<(), ModelError> {
        self.group.update(&self.version, |e| e.add_argument(text))
    }

    pub fn remove_argument(&self, index: usize) -> Result<RobotToken, ModelError> {
        self.group.update(&self.version, |e| e.remove_argument(index))
    }

    pub fn add_comment_part(&self, text: impl Into<SmolStr>) {
        self.group.update(&self.version, |e| e.add_comment_part(text))
    }

    pub fn set_comment(&self, text: impl Into<SmolStr>) {
        self.group.update(&self.version, |e| e.set_comment(text))
    }
}

//! Mutable document model
//!
//! A [`RobotFile`] holds one table per section. Every construct is a
//! [`ModelElement`] tagged with a [`ModelType`]; repeatable settings sit in
//! [`SettingGroup`]s and are read through [`SettingView`]s.
//!
//! ```text
//! RobotFile
//!   ├── SettingTable   imports, metadata, SettingGroup per SettingKind
//!   ├── VariableTable  variables
//!   ├── CodeTable      test cases ─┐
//!   ├── CodeTable      tasks       ├─ CodeHolder { name, body }
//!   └── CodeTable      keywords   ─┘
//! ```

mod element;
mod file;
mod model_type;
mod tables;
mod views;

pub use element::{DictionaryItem, ImportAlias, ModelElement, ModelError};
pub use file::{ElementRef, EndOfLine, HeaderSlot, RobotFile, RobotFileOutput, RobotLine};
pub use model_type::{CodeKind, ModelType, SettingKind, ValueLayout};
pub use tables::{CodeHolder, CodeTable, SettingTable, VariableTable};
pub(crate) use tables::new_header;
pub use views::{SettingGroup, SettingView};

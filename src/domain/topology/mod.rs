//! Fixed hardware topology.
//!
//! The diagram is data: `ModuleId` names every selectable component and
//! `TopologyLayout` places it. The renderer and the info store both key on
//! `ModuleId`, so a shape can never carry a name the store does not expect.

mod geometry;
mod layout;
mod module_id;

pub use geometry::{Bounds, Point};
pub use layout::{
    Connection, GroupFrame, LabelText, Palette, Port, SelectableShape, ShapeForm, TopologyLayout,
    BUS_Y, MODULE_HEIGHT, MODULE_WIDTH, NODE_SIZE,
};
pub use module_id::{ModuleId, ModuleKind, CORE_COUNT};

use super::geometry::{Bounds, Point};
use super::module_id::{CORE_COUNT, ModuleId};
use std::f32::consts::TAU;

pub const MODULE_WIDTH: f32 = 150.0;
pub const MODULE_HEIGHT: f32 = 80.0;
pub const NODE_SIZE: f32 = 50.0;
/// Vertical centre of the bus nodes.
pub const BUS_Y: f32 = 400.0;

const LANE_X: [f32; CORE_COUNT as usize] = [200.0, 400.0, 800.0, 1000.0];
const BUS_NODE_X: [f32; 5] = [250.0, 450.0, 650.0, 850.0, 1050.0];
const CPU_Y: f32 = 100.0;
const L2_Y: f32 = 200.0;
const L3_Y: f32 = 600.0;
const MEMORY_Y: f32 = 800.0;
const MODULE_GAP: f32 = 20.0;
const GROUP_MARGIN: f32 = 20.0;
const PORT_RING_RADIUS: f32 = 30.0;
const ROUTE_OFFSET: f32 = 50.0;
const BUS_HIT_TOLERANCE: f32 = 6.0;

/// Port ids attached to each bus node.
const NODE_PORTS: [&[u8]; 5] = [&[0, 1], &[2, 3], &[4], &[5, 6], &[7, 8]];
/// (bus node, port) each L2 lane is wired to.
const L2_LINKS: [(usize, u8); CORE_COUNT as usize] = [(0, 0), (1, 2), (3, 5), (4, 7)];
/// (bus node, port) each L3 lane is wired to.
const L3_LINKS: [(usize, u8); CORE_COUNT as usize] = [(0, 1), (1, 3), (3, 6), (4, 8)];
const MEMORY_LINK: (usize, u8) = (2, 4);
const TRACE_BOUNDS: Bounds = Bounds::new(1010.0, 720.0, 160.0, 60.0);

/// Colour role of a shape; the UI maps roles to concrete colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Cpu,
    L2Cache,
    L3Cache,
    Memory,
    Dma,
    BusNode,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeForm {
    Rect,
    Ellipse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelText {
    pub text: String,
    pub pos: Point,
    pub emphasis: bool,
}

impl LabelText {
    fn plain(text: impl Into<String>, pos: Point) -> Self {
        Self {
            text: text.into(),
            pos,
            emphasis: false,
        }
    }
}

/// A shape the user can click, tagged with the module it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableShape {
    pub id: ModuleId,
    pub bounds: Bounds,
    pub form: ShapeForm,
    pub palette: Palette,
    /// Lines drawn inside the shape, top-left aligned.
    pub label: Vec<String>,
}

impl SelectableShape {
    fn module(id: ModuleId, x: f32, y: f32, palette: Palette, label: Vec<String>) -> Self {
        Self {
            id,
            bounds: Bounds::new(x, y, MODULE_WIDTH, MODULE_HEIGHT),
            form: ShapeForm::Rect,
            palette,
            label,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        match self.form {
            ShapeForm::Rect => self.bounds.contains(p),
            ShapeForm::Ellipse => self.bounds.ellipse_contains(p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Port {
    pub node: usize,
    pub id: u8,
    pub pos: Point,
}

/// Orthogonal wire between two components.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub points: Vec<Point>,
    pub label: Option<LabelText>,
}

/// Frame drawn around a set of modules.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFrame {
    pub bounds: Bounds,
    pub label: Option<LabelText>,
    pub dashed: bool,
    /// Selectable frames sit below the modules they enclose.
    pub selectable: Option<ModuleId>,
}

/// The complete, fixed hardware diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyLayout {
    pub shapes: Vec<SelectableShape>,
    pub groups: Vec<GroupFrame>,
    pub ports: Vec<Port>,
    pub connections: Vec<Connection>,
    pub bus_line: (Point, Point),
    pub labels: Vec<LabelText>,
}

impl TopologyLayout {
    /// Builds the four-lane CPU / L2 / bus / L3 / memory diagram.
    pub fn standard() -> Self {
        let mut shapes = Vec::new();
        let mut groups = Vec::new();
        let mut ports = Vec::new();
        let mut connections = Vec::new();
        let mut labels = Vec::new();

        // Bus nodes and their port rings
        for (index, x) in BUS_NODE_X.iter().enumerate() {
            let bounds = Bounds::new(*x, BUS_Y - NODE_SIZE / 2.0, NODE_SIZE, NODE_SIZE);
            shapes.push(SelectableShape {
                id: ModuleId::BusNode,
                bounds,
                form: ShapeForm::Ellipse,
                palette: Palette::BusNode,
                label: Vec::new(),
            });
            labels.push(LabelText::plain(
                format!("Node{}", index),
                Point::new(bounds.x - 10.0, bounds.bottom() + 5.0),
            ));

            let node_ports = NODE_PORTS[index];
            let center = bounds.center();
            for (slot, id) in node_ports.iter().enumerate() {
                let angle = TAU * slot as f32 / node_ports.len() as f32;
                let pos = center.offset(
                    PORT_RING_RADIUS * angle.cos(),
                    PORT_RING_RADIUS * angle.sin(),
                );
                ports.push(Port {
                    node: index,
                    id: *id,
                    pos,
                });
                labels.push(LabelText::plain(format!("P{}", id), pos.offset(5.0, -10.0)));
            }
        }

        let first_center = BUS_NODE_X[0] + NODE_SIZE / 2.0;
        let last_center = BUS_NODE_X[BUS_NODE_X.len() - 1] + NODE_SIZE / 2.0;
        let bus_line = (
            Point::new(first_center, BUS_Y + 25.0),
            Point::new(last_center, BUS_Y + 25.0),
        );
        labels.push(LabelText {
            text: "Bus".to_string(),
            pos: Point::new((first_center + last_center) / 2.0 + 50.0, BUS_Y + 30.0),
            emphasis: true,
        });

        let port_pos = |node: usize, id: u8| -> Option<Point> {
            ports
                .iter()
                .find(|p| p.node == node && p.id == id)
                .map(|p| p.pos)
        };

        // L3 lanes and the selectable L3 group underneath them
        let mut l3_union: Option<Bounds> = None;
        for lane in 0..CORE_COUNT {
            let i = lane as usize;
            let (node, port) = L3_LINKS[i];
            let shape = SelectableShape::module(
                ModuleId::L3Cache(lane),
                LANE_X[i],
                L3_Y,
                Palette::L3Cache,
                vec![format!("L3Cache{}", lane), format!("port {}", port)],
            );
            if let Some(target) = port_pos(node, port) {
                connections.push(route_vertical_first(
                    shape.bounds.top_center(),
                    -ROUTE_OFFSET,
                    target,
                    port,
                ));
            }
            l3_union = Some(match l3_union {
                Some(acc) => acc.union(&shape.bounds),
                None => shape.bounds,
            });
            shapes.push(shape);
        }
        if let Some(union) = l3_union {
            groups.push(GroupFrame {
                bounds: union.expand(GROUP_MARGIN),
                label: None,
                dashed: false,
                selectable: Some(ModuleId::L3Group),
            });
        }

        // Cache event trace tap, wired to the right end of the bus
        shapes.push(SelectableShape {
            id: ModuleId::CacheEventTrace,
            bounds: TRACE_BOUNDS,
            form: ShapeForm::Rect,
            palette: Palette::Trace,
            label: vec!["cache_event".to_string(), "trace".to_string()],
        });
        let trace_start = TRACE_BOUNDS.right_center();
        let bus_tap = Point::new(last_center, BUS_Y + 28.0);
        connections.push(Connection {
            points: vec![
                trace_start,
                trace_start.offset(30.0, 0.0),
                Point::new(trace_start.x + 30.0, bus_tap.y),
                bus_tap,
            ],
            label: None,
        });

        // Memory node under bus node 2, DMA under memory
        let memory_x = BUS_NODE_X[MEMORY_LINK.0] + NODE_SIZE / 2.0 - MODULE_WIDTH / 2.0;
        let memory = SelectableShape::module(
            ModuleId::MemoryNode0,
            memory_x,
            MEMORY_Y,
            Palette::Memory,
            vec![
                "MemoryNode0".to_string(),
                format!("port {}", MEMORY_LINK.1),
            ],
        );
        let dma = SelectableShape::module(
            ModuleId::Dma,
            memory_x,
            memory.bounds.bottom() + MODULE_GAP,
            Palette::Dma,
            vec!["DMA".to_string()],
        );
        connections.push(Connection {
            points: vec![memory.bounds.bottom_center(), dma.bounds.top_center()],
            label: None,
        });
        if let Some(target) = port_pos(MEMORY_LINK.0, MEMORY_LINK.1) {
            connections.push(route_vertical_first(
                memory.bounds.top_center(),
                -ROUTE_OFFSET,
                target,
                MEMORY_LINK.1,
            ));
        }
        shapes.push(memory);
        shapes.push(dma);

        // CPU over L2 in each lane, framed as a group
        for lane in 0..CORE_COUNT {
            let i = lane as usize;
            let (node, port) = L2_LINKS[i];
            let cpu = SelectableShape::module(
                ModuleId::Cpu(lane),
                LANE_X[i],
                CPU_Y,
                Palette::Cpu,
                vec![format!("CPU{}", lane)],
            );
            let l2 = SelectableShape::module(
                ModuleId::L2Cache(lane),
                LANE_X[i],
                L2_Y,
                Palette::L2Cache,
                vec![format!("L2Cache{}", lane), format!("port {}", port)],
            );
            connections.push(Connection {
                points: vec![cpu.bounds.bottom_center(), l2.bounds.top_center()],
                label: None,
            });
            if let Some(target) = port_pos(node, port) {
                connections.push(route_vertical_first(
                    l2.bounds.bottom_center(),
                    ROUTE_OFFSET,
                    target,
                    port,
                ));
            }

            let frame = cpu.bounds.union(&l2.bounds).expand(GROUP_MARGIN);
            groups.push(GroupFrame {
                bounds: frame,
                label: Some(LabelText::plain(
                    format!("CPU-L2 Group {}", lane),
                    frame.top_left().offset(10.0, -40.0),
                )),
                dashed: true,
                selectable: None,
            });
            shapes.push(cpu);
            shapes.push(l2);
        }

        Self {
            shapes,
            groups,
            ports,
            connections,
            bus_line,
            labels,
        }
    }

    /// Resolves a diagram point to the topmost selectable module.
    ///
    /// Shapes win over the bus bar, and the bus bar wins over group frames.
    pub fn hit_test(&self, p: Point) -> Option<ModuleId> {
        if let Some(shape) = self.shapes.iter().rev().find(|s| s.contains(p)) {
            return Some(shape.id);
        }

        let (start, end) = self.bus_line;
        if p.x >= start.x && p.x <= end.x && (p.y - start.y).abs() <= BUS_HIT_TOLERANCE {
            return Some(ModuleId::Bus);
        }

        self.groups
            .iter()
            .filter_map(|g| g.selectable.map(|id| (g, id)))
            .find(|(g, _)| g.bounds.contains(p))
            .map(|(_, id)| id)
    }

    /// First shape drawn for `id` (bus nodes share one id).
    pub fn shape_of(&self, id: ModuleId) -> Option<&SelectableShape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Bounding box of everything drawn, with room for labels.
    pub fn extent(&self) -> Bounds {
        let mut extent = Bounds::new(0.0, 0.0, 0.0, 0.0);
        for shape in &self.shapes {
            extent = extent.union(&shape.bounds);
        }
        for group in &self.groups {
            extent = extent.union(&group.bounds);
        }
        for connection in &self.connections {
            for p in &connection.points {
                extent = extent.union(&Bounds::new(p.x, p.y, 0.0, 0.0));
            }
        }
        extent.expand(GROUP_MARGIN)
    }
}

/// Leaves `start` vertically by `rise`, runs horizontally, then drops onto `target`.
fn route_vertical_first(start: Point, rise: f32, target: Point, port: u8) -> Connection {
    let elbow_y = start.y + rise;
    Connection {
        points: vec![
            start,
            Point::new(start.x, elbow_y),
            Point::new(target.x, elbow_y),
            target,
        ],
        label: Some(LabelText::plain(
            format!("port {}", port),
            Point::new((start.x + target.x) / 2.0, elbow_y),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_module_is_drawn() {
        let layout = TopologyLayout::standard();
        for id in ModuleId::all() {
            let drawn = layout.shape_of(id).is_some()
                || layout.groups.iter().any(|g| g.selectable == Some(id))
                || id == ModuleId::Bus;
            assert!(drawn, "{} has no shape", id);
        }
    }

    #[test]
    fn test_hit_test_resolves_module_centres() {
        let layout = TopologyLayout::standard();
        for shape in &layout.shapes {
            assert_eq!(layout.hit_test(shape.bounds.center()), Some(shape.id));
        }
    }

    #[test]
    fn test_bus_nodes_share_one_identity() {
        let layout = TopologyLayout::standard();
        let nodes: Vec<_> = layout
            .shapes
            .iter()
            .filter(|s| s.form == ShapeForm::Ellipse)
            .collect();
        assert_eq!(nodes.len(), 5);
        assert!(nodes.iter().all(|s| s.id == ModuleId::BusNode));
    }

    #[test]
    fn test_l3_group_is_hit_between_caches() {
        let layout = TopologyLayout::standard();
        // gap between L3Cache1 (400..550) and L3Cache2 (800..950)
        assert_eq!(
            layout.hit_test(Point::new(650.0, 640.0)),
            Some(ModuleId::L3Group)
        );
        assert_eq!(
            layout.hit_test(Point::new(475.0, 640.0)),
            Some(ModuleId::L3Cache(1))
        );
    }

    #[test]
    fn test_bus_bar_and_empty_space() {
        let layout = TopologyLayout::standard();
        assert_eq!(layout.hit_test(Point::new(360.0, 426.0)), Some(ModuleId::Bus));
        assert_eq!(layout.hit_test(Point::new(5.0, 5.0)), None);
        // CPU-L2 group frames are decoration only
        assert_eq!(layout.hit_test(Point::new(190.0, 150.0)), None);
    }

    #[test]
    fn test_ports_follow_wiring_table() {
        let layout = TopologyLayout::standard();
        assert_eq!(layout.ports.len(), 9);
        let memory_port = layout
            .ports
            .iter()
            .find(|p| p.node == 2 && p.id == 4)
            .unwrap();
        // single port sits at angle zero, right of the node centre
        assert_eq!(memory_port.pos, Point::new(705.0, 400.0));
    }

    #[test]
    fn test_memory_sits_under_node_two_with_dma_below() {
        let layout = TopologyLayout::standard();
        let memory = layout.shape_of(ModuleId::MemoryNode0).unwrap();
        let dma = layout.shape_of(ModuleId::Dma).unwrap();
        assert_eq!(memory.bounds.x, 600.0);
        assert_eq!(dma.bounds.y, memory.bounds.bottom() + 20.0);
    }

    #[test]
    fn test_extent_covers_every_shape() {
        let layout = TopologyLayout::standard();
        let extent = layout.extent();
        for shape in &layout.shapes {
            assert!(extent.contains(shape.bounds.top_left()));
            assert!(extent.contains(Point::new(shape.bounds.right(), shape.bounds.bottom())));
        }
    }
}

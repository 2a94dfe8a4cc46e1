//! Mapping between stop ids and search nodes.

use std::fmt;

/// Index of a node in the route graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Translates between stop ids and search nodes.
///
/// Node layout, for `n` stops and `v` vehicles:
///
/// ```text
/// [0, n-1)          one node per non-depot stop, in stop id order
/// [n-1, n-1+v)      start node of vehicle 0..v
/// [n-1+v, n-1+2v)   end node of vehicle 0..v
/// ```
///
/// # Examples
///
/// ```
/// use tw_routing::graph::RouteGraph;
///
/// let graph = RouteGraph::new(5, 4, 0);
/// assert_eq!(graph.num_nodes(), 4 + 2 * 4);
/// assert_eq!(graph.node_to_stop(graph.start_node(2)), 0);
/// assert_eq!(graph.stop_to_node(1, 0), graph.start_node(1));
/// let node = graph.stop_to_node(3, 2);
/// assert_eq!(graph.node_to_stop(node), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGraph {
    num_stops: usize,
    num_vehicles: usize,
    depot: usize,
    node_to_stop: Vec<usize>,
    stop_to_node: Vec<Option<NodeIndex>>,
}

impl RouteGraph {
    /// Builds the graph for `num_stops` stops (depot included).
    pub fn new(num_stops: usize, num_vehicles: usize, depot: usize) -> Self {
        let num_customers = num_stops.saturating_sub(1);
        let mut node_to_stop = Vec::with_capacity(num_customers + 2 * num_vehicles);
        let mut stop_to_node = vec![None; num_stops];

        for stop in (0..num_stops).filter(|&s| s != depot) {
            stop_to_node[stop] = Some(NodeIndex(node_to_stop.len()));
            node_to_stop.push(stop);
        }
        node_to_stop.extend(std::iter::repeat(depot).take(2 * num_vehicles));

        Self {
            num_stops,
            num_vehicles,
            depot,
            node_to_stop,
            stop_to_node,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.node_to_stop.len()
    }

    pub fn num_stops(&self) -> usize {
        self.num_stops
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    fn num_customers(&self) -> usize {
        self.num_stops - 1
    }

    pub fn start_node(&self, vehicle: usize) -> NodeIndex {
        debug_assert!(vehicle < self.num_vehicles);
        NodeIndex(self.num_customers() + vehicle)
    }

    pub fn end_node(&self, vehicle: usize) -> NodeIndex {
        debug_assert!(vehicle < self.num_vehicles);
        NodeIndex(self.num_customers() + self.num_vehicles + vehicle)
    }

    pub fn is_start(&self, node: NodeIndex) -> bool {
        (self.num_customers()..self.num_customers() + self.num_vehicles).contains(&node.0)
    }

    pub fn is_end(&self, node: NodeIndex) -> bool {
        node.0 >= self.num_customers() + self.num_vehicles && node.0 < self.num_nodes()
    }

    /// Vehicle owning a start or end node.
    pub fn vehicle_of(&self, node: NodeIndex) -> Option<usize> {
        if self.is_start(node) {
            Some(node.0 - self.num_customers())
        } else if self.is_end(node) {
            Some(node.0 - self.num_customers() - self.num_vehicles)
        } else {
            None
        }
    }

    /// Stop a node stands for. Start and end nodes map to the depot.
    pub fn node_to_stop(&self, node: NodeIndex) -> usize {
        self.node_to_stop[node.0]
    }

    /// Node for `stop` on `vehicle`'s route. The depot maps to the vehicle's
    /// start node; every other stop has the same node for all vehicles.
    pub fn stop_to_node(&self, vehicle: usize, stop: usize) -> NodeIndex {
        match self.stop_to_node[stop] {
            Some(node) => node,
            None => self.start_node(vehicle),
        }
    }

    /// Full node chain of a route: start node, stop nodes, end node.
    pub fn route_nodes(&self, vehicle: usize, stops: &[usize]) -> Vec<NodeIndex> {
        let mut nodes = Vec::with_capacity(stops.len() + 2);
        nodes.push(self.start_node(vehicle));
        nodes.extend(stops.iter().map(|&s| self.stop_to_node(vehicle, s)));
        nodes.push(self.end_node(vehicle));
        nodes
    }
}


use quantifiable_derive::Quantifiable;//the derive macro
use super::{Topology,Location};
use crate::matrix::Matrix;
use crate::error::Error;
use crate::error;

///A topology given by the list of neighbours at each router port, as read from the connectivity records.
///Each router has `graph_degree` router ports. Router ports without a record are left disconnected.
#[derive(Quantifiable)]
#[derive(Debug)]
pub struct GraphTopology
{
	///list[router][port] = what is at the other side of the port.
	list: Vec<Vec<Location>>,
	///distance_matrix.get(i,j) = distance from router i to router j
	distance_matrix: Matrix<usize>,
}

impl Topology for GraphTopology
{
	fn num_routers(&self) -> usize
	{
		self.list.len()
	}
	fn neighbour(&self, router_index:usize, port:usize) -> Location
	{
		self.list[router_index].get(port).cloned().unwrap_or(Location::None)
	}
	fn degree(&self, router_index: usize) -> usize
	{
		self.list[router_index].len()
	}
}

impl GraphTopology
{
	///Build the graph from `(source, destination, port)` connectivity records of every router.
	pub fn from_records(num_routers:usize, graph_degree:usize, records:&[(usize,usize,usize)]) -> Result<GraphTopology,Error>
	{
		let mut list=vec![vec![Location::None;graph_degree];num_routers];
		for &(source,destination,port) in records
		{
			if source>=num_routers || destination>=num_routers
			{
				return Err(error!(bad_argument).with_message(format!("connectivity record ({},{},{}) refers to a router beyond the {} routers",source,destination,port,num_routers)));
			}
			if port>=graph_degree
			{
				return Err(error!(port_count_mismatch,port+1,graph_degree).with_message(format!("router {} connects to router {} through port {}, which is not a router port",source,destination,port)));
			}
			list[source][port]=Location::RouterPort{router_index:destination};
		}
		let mut topology=GraphTopology{
			list,
			distance_matrix: Matrix::constant(0,0,0),
		};
		topology.distance_matrix=topology.compute_distance_matrix();
		Ok(topology)
	}
	///The precomputed distance matrix.
	pub fn distance_matrix(&self) -> &Matrix<usize>
	{
		&self.distance_matrix
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	///A ring of `n` routers, port 0 going forward and port 1 going backward.
	fn ring_records(n:usize) -> Vec<(usize,usize,usize)>
	{
		(0..n).flat_map(|r|vec![(r,(r+1)%n,0),(r,(r+n-1)%n,1)]).collect()
	}
	#[test]
	fn ring_distances()
	{
		let topology=GraphTopology::from_records(6,2,&ring_records(6)).expect("valid ring");
		let distances=topology.distance_matrix();
		assert_eq!(*distances.get(0,3),3);
		assert_eq!(*distances.get(0,5),1);
		assert_eq!(*distances.get(2,2),0);
		assert_eq!(topology.num_routers(),6);
	}
	#[test]
	fn router_ports()
	{
		let topology=GraphTopology::from_records(4,3,&ring_records(4)).expect("valid ring");
		assert_eq!(topology.degree(1),3);
		assert_eq!(topology.neighbour(0,0),Location::RouterPort{router_index:1});
		assert_eq!(topology.neighbour(0,1),Location::RouterPort{router_index:3});
		//The third port has no record and the fourth is not a router port.
		assert_eq!(topology.neighbour(0,2),Location::None);
		assert_eq!(topology.neighbour(0,3),Location::None);
	}
	#[test]
	fn disconnected_routers_are_unreachable()
	{
		let topology=GraphTopology::from_records(3,1,&[(0,1,0),(1,0,0)]).expect("valid graph");
		assert_eq!(*topology.distance_matrix().get(0,2),usize::MAX);
		assert_eq!(topology.bfs(1),vec![1,0,usize::MAX]);
	}
	#[test]
	fn reject_bad_records()
	{
		assert!(GraphTopology::from_records(3,1,&[(0,5,0)]).is_err());
		let err=GraphTopology::from_records(3,1,&[(0,1,2)]).unwrap_err();
		assert!(err.is_configuration_error());
	}
}

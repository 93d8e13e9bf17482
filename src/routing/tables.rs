/*!

Per-router tables derived offline from the topology graph: the paths to every other router, the optional weighted paths, the local ports towards each neighbour and the optional distances between routers.

A [RouterTables] is owned by its router, including the round-robin cursors. The distance table is the same for every router and is shared.

*/

use std::collections::BTreeMap;
use std::rc::Rc;

use quantifiable_derive::Quantifiable;//the derive macro
use crate::matrix::Matrix;
use crate::quantify::Quantifiable;
use crate::error::Error;
use crate::error;

///The paths from a router to a destination, together with the round-robin cursor of the deterministic selection.
#[derive(Debug,Clone,Quantifiable)]
pub struct PathSet
{
	///Always a valid index into `paths`.
	cursor: usize,
	paths: Vec<Vec<usize>>,
}

impl PathSet
{
	pub fn cursor(&self) -> usize
	{
		self.cursor
	}
	pub fn paths(&self) -> &[Vec<usize>]
	{
		&self.paths
	}
}

///destination router -> paths with cursor.
#[derive(Debug,Clone,Default,Quantifiable)]
pub struct RoutingTable
{
	entries: BTreeMap<usize,PathSet>,
}

impl RoutingTable
{
	pub fn new() -> RoutingTable
	{
		RoutingTable::default()
	}
	///Add a path towards `destination`, after the ones already stored.
	pub fn push(&mut self, destination:usize, path:Vec<usize>)
	{
		self.entries.entry(destination).or_insert_with(||PathSet{cursor:0,paths:vec![]}).paths.push(path);
	}
	pub fn len(&self) -> usize
	{
		self.entries.len()
	}
	pub fn is_empty(&self) -> bool
	{
		self.entries.is_empty()
	}
	pub fn get(&self, destination:usize) -> Option<&PathSet>
	{
		self.entries.get(&destination)
	}
	pub fn iter(&self) -> impl Iterator<Item=(usize,&PathSet)>
	{
		self.entries.iter().map(|(&d,set)|(d,set))
	}
}

impl std::iter::FromIterator<(usize,Vec<Vec<usize>>)> for RoutingTable
{
	fn from_iter<I:IntoIterator<Item=(usize,Vec<Vec<usize>>)>>(iter:I) -> RoutingTable
	{
		let mut table=RoutingTable::new();
		for (destination,paths) in iter
		{
			for path in paths
			{
				table.push(destination,path);
			}
		}
		table
	}
}

///destination router -> list of (weight, path). Weights are not normalized.
#[derive(Debug,Clone,Default,Quantifiable)]
pub struct WeightedRoutingTable
{
	entries: BTreeMap<usize,Vec<(f64,Vec<usize>)>>,
}

impl WeightedRoutingTable
{
	pub fn new() -> WeightedRoutingTable
	{
		WeightedRoutingTable::default()
	}
	pub fn push(&mut self, destination:usize, weight:f64, path:Vec<usize>)
	{
		self.entries.entry(destination).or_insert_with(Vec::new).push((weight,path));
	}
	pub fn len(&self) -> usize
	{
		self.entries.len()
	}
	pub fn is_empty(&self) -> bool
	{
		self.entries.is_empty()
	}
	pub fn get(&self, destination:usize) -> Option<&[(f64,Vec<usize>)]>
	{
		self.entries.get(&destination).map(|list|&list[..])
	}
	pub fn iter(&self) -> impl Iterator<Item=(usize,&[(f64,Vec<usize>)])>
	{
		self.entries.iter().map(|(&d,list)|(d,&list[..]))
	}
}

///neighbour router -> local ports leading to it, sorted. Parallel links give several ports.
#[derive(Debug,Clone,Default,Quantifiable)]
pub struct ConnectivityMap
{
	ports: BTreeMap<usize,Vec<usize>>,
}

impl ConnectivityMap
{
	pub fn new() -> ConnectivityMap
	{
		ConnectivityMap::default()
	}
	pub fn insert(&mut self, neighbour:usize, port:usize)
	{
		let list=self.ports.entry(neighbour).or_insert_with(Vec::new);
		if let Err(position)=list.binary_search(&port)
		{
			list.insert(position,port);
		}
	}
	///The port used towards `neighbour`. With parallel links the lowest port is used.
	pub fn port(&self, neighbour:usize) -> Option<usize>
	{
		self.ports.get(&neighbour).and_then(|list|list.first().copied())
	}
	///All the ports towards `neighbour`.
	pub fn ports(&self, neighbour:usize) -> &[usize]
	{
		self.ports.get(&neighbour).map(|list|&list[..]).unwrap_or(&[])
	}
	pub fn len(&self) -> usize
	{
		self.ports.len()
	}
	pub fn is_empty(&self) -> bool
	{
		self.ports.is_empty()
	}
	pub fn iter(&self) -> impl Iterator<Item=(usize,&[usize])>
	{
		self.ports.iter().map(|(&n,list)|(n,&list[..]))
	}
}

impl std::iter::FromIterator<(usize,usize)> for ConnectivityMap
{
	fn from_iter<I:IntoIterator<Item=(usize,usize)>>(iter:I) -> ConnectivityMap
	{
		let mut map=ConnectivityMap::new();
		for (neighbour,port) in iter
		{
			map.insert(neighbour,port);
		}
		map
	}
}

///Hop distance between every ordered pair of routers.
#[derive(Debug,Clone,Quantifiable)]
pub struct DistanceTable
{
	matrix: Matrix<usize>,
}

impl DistanceTable
{
	pub fn new(matrix:Matrix<usize>) -> DistanceTable
	{
		DistanceTable{matrix}
	}
	pub fn get(&self, source:usize, destination:usize) -> Option<usize>
	{
		self.matrix.try_get(source,destination).copied()
	}
	pub fn num_routers(&self) -> usize
	{
		self.matrix.get_rows()
	}
}

///All the tables of a router.
#[derive(Debug,Clone,Quantifiable)]
pub struct RouterTables
{
	router: usize,
	routing: RoutingTable,
	weighted: Option<WeightedRoutingTable>,
	connectivity: ConnectivityMap,
	distance: Option<Rc<DistanceTable>>,
}

impl RouterTables
{
	pub fn new(router:usize, routing:RoutingTable, connectivity:ConnectivityMap) -> RouterTables
	{
		RouterTables{
			router,
			routing,
			weighted: None,
			connectivity,
			distance: None,
		}
	}
	pub fn with_weighted(mut self, weighted:WeightedRoutingTable) -> RouterTables
	{
		self.weighted=Some(weighted);
		self
	}
	pub fn with_distance(mut self, distance:Rc<DistanceTable>) -> RouterTables
	{
		self.distance=Some(distance);
		self
	}
	pub fn router(&self) -> usize
	{
		self.router
	}
	pub fn routing(&self) -> &RoutingTable
	{
		&self.routing
	}
	pub fn weighted(&self) -> Option<&WeightedRoutingTable>
	{
		self.weighted.as_ref()
	}
	pub fn connectivity(&self) -> &ConnectivityMap
	{
		&self.connectivity
	}
	pub fn has_distance(&self) -> bool
	{
		self.distance.is_some()
	}
	///The paths towards `destination` with their cursor.
	pub fn paths_for(&self, destination:usize) -> Result<&PathSet,Error>
	{
		self.routing.get(destination).ok_or_else(||error!(missing_entry,self.router,destination,"routing"))
	}
	///Take the path under the cursor towards `destination` and advance the cursor.
	pub fn next_path(&mut self, destination:usize) -> Result<Vec<usize>,Error>
	{
		let router=self.router;
		let set=self.routing.entries.get_mut(&destination).ok_or_else(||error!(missing_entry,router,destination,"routing"))?;
		let path=set.paths[set.cursor].clone();
		set.cursor=(set.cursor+1)%set.paths.len();
		Ok(path)
	}
	pub fn weighted_paths_for(&self, destination:usize) -> Result<&[(f64,Vec<usize>)],Error>
	{
		let table=self.weighted.as_ref().ok_or_else(||error!(missing_table,Some(self.router),"weighted routing"))?;
		table.get(destination).ok_or_else(||error!(missing_entry,self.router,destination,"weighted routing"))
	}
	pub fn distance(&self, source:usize, destination:usize) -> Result<usize,Error>
	{
		let table=self.distance.as_ref().ok_or_else(||error!(missing_table,Some(self.router),"distance"))?;
		match table.get(source,destination)
		{
			Some(d) if d!=usize::MAX => Ok(d),
			_ => Err(error!(missing_entry,source,destination,"distance")),
		}
	}
	///The local port towards a neighbour router.
	pub fn port_for(&self, neighbour:usize) -> Result<usize,Error>
	{
		self.connectivity.port(neighbour).ok_or_else(||error!(missing_entry,self.router,neighbour,"connectivity"))
	}
	///Check the tables against the network parameters.
	///Every other router must have a nonempty entry; paths must begin at this router, end at their destination, stay among the `num_routers` routers and use at most `max_path_length` hops.
	pub fn validate(&self, num_routers:usize, max_path_length:usize) -> Result<(),Error>
	{
		if self.routing.len()+1!=num_routers || self.routing.get(self.router).is_some()
		{
			return Err(error!(bad_argument).with_message(format!("the routing table of router {} has {} destinations instead of {}",self.router,self.routing.len(),num_routers.saturating_sub(1))));
		}
		for (destination,set) in self.routing.iter()
		{
			if set.paths.is_empty()
			{
				return Err(error!(bad_argument).with_message(format!("the routing table of router {} has no paths to {}",self.router,destination)));
			}
			for path in set.paths.iter()
			{
				self.validate_path(path,destination,num_routers,max_path_length)?;
			}
		}
		if let Some(ref weighted)=self.weighted
		{
			for (destination,list) in weighted.iter()
			{
				for &(weight,ref path) in list
				{
					if !(weight>=0.0)
					{
						return Err(error!(bad_argument).with_message(format!("negative weight {} in the weighted table of router {}",weight,self.router)));
					}
					self.validate_path(path,destination,num_routers,max_path_length)?;
				}
			}
		}
		if let Some(ref distance)=self.distance
		{
			if distance.num_routers()!=num_routers
			{
				return Err(error!(bad_argument).with_message(format!("the distance table has {} routers instead of {}",distance.num_routers(),num_routers)));
			}
		}
		Ok(())
	}
	fn validate_path(&self, path:&[usize], destination:usize, num_routers:usize, max_path_length:usize) -> Result<(),Error>
	{
		if path.len()<2 || path[0]!=self.router || path[path.len()-1]!=destination
		{
			return Err(error!(bad_argument).with_message(format!("the path {:?} at router {} does not go from {} to {}",path,self.router,self.router,destination)));
		}
		if let Some(&bad)=path.iter().find(|&&r|r>=num_routers)
		{
			return Err(error!(bad_argument).with_message(format!("the path {:?} at router {} visits router {} beyond the {} routers",path,self.router,bad,num_routers)));
		}
		if path.len()-1>max_path_length
		{
			return Err(error!(bad_argument).with_message(format!("the path {:?} at router {} is longer than max_path_length={}",path,self.router,max_path_length)));
		}
		if self.connectivity.port(path[1]).is_none()
		{
			return Err(error!(bad_argument).with_message(format!("the path {:?} at router {} starts towards router {}, which is not a neighbour",path,self.router,path[1])));
		}
		Ok(())
	}
}

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use caminos_multipath::*;
use caminos_multipath::config::parse_configuration;
use caminos_multipath::config_parser::ConfigurationValue;
use caminos_multipath::router::{FromGraphParameters,IdleNetwork,OutputQueueLengths};
use caminos_multipath::routing::tables::{RoutingTable,ConnectivityMap,RouterTables};

///The shortest paths from `router` in a ring of `n` routers, forward first when both directions tie.
pub fn ring_paths(n:usize, router:usize) -> Vec<(usize,Vec<Vec<usize>>)>
{
	(0..n).filter(|&d|d!=router).map(|destination|{
		let forward_hops=(destination+n-router)%n;
		let backward_hops=n-forward_hops;
		let mut paths=vec![];
		if forward_hops<=backward_hops
		{
			paths.push((0..=forward_hops).map(|k|(router+k)%n).collect());
		}
		if backward_hops<=forward_hops
		{
			paths.push((0..=backward_hops).map(|k|(router+n-k)%n).collect());
		}
		(destination,paths)
	}).collect()
}

///Port 0 goes to `router+1` and port 1 to `router-1`.
pub fn ring_connectivity(n:usize, router:usize) -> ConnectivityMap
{
	vec![((router+1)%n,0),((router+n-1)%n,1)].into_iter().collect()
}

pub fn ring_tables(n:usize, router:usize) -> RouterTables
{
	let routing:RoutingTable=ring_paths(n,router).into_iter().collect();
	RouterTables::new(router,routing,ring_connectivity(n,router))
}

///A `FromGraph` configuration with the given members.
pub fn from_graph(members:&str) -> ConfigurationValue
{
	parse_configuration(&format!("FromGraph{{{}}}",members)).expect("the configuration should parse")
}

///A ring network with tables built in memory. `members` are added to the ring shape.
pub fn ring_network(n:usize, members:&str) -> Network
{
	let cv=from_graph(&format!("num_routers:{}, graph_degree:2, hosts_per_router:1, max_path_length:{}, {}",n,n/2,members));
	let parameters=FromGraphParameters::from_configuration(&cv).expect("valid parameters");
	let tables=(0..n).map(|r|ring_tables(n,r)).collect();
	Network::from_tables(parameters,tables).expect("valid network")
}

pub fn idle(n:usize) -> Vec<IdleNetwork>
{
	vec![IdleNetwork;n]
}

///Empty queues sized for each router of the network.
pub fn empty_queues(network:&Network) -> Vec<OutputQueueLengths>
{
	(0..network.num_routers()).map(|r|network.router(r).expect("router").new_output_queue_lengths()).collect()
}

///Write `CON.csv`, `RT.csv` and `WRT.csv` for a ring of `n` routers. The weighted table gives all the weight to the backward path when there are two.
pub fn write_ring_files(directory:&Path, n:usize)
{
	let mut con=File::create(directory.join("CON.csv")).expect("create CON.csv");
	let mut rt=File::create(directory.join("RT.csv")).expect("create RT.csv");
	let mut wrt=File::create(directory.join("WRT.csv")).expect("create WRT.csv");
	writeln!(con,"source,dest,port").expect("write");
	writeln!(rt,"source,dest,path").expect("write");
	writeln!(wrt,"source,dest,weight,path").expect("write");
	for router in 0..n
	{
		for (neighbour,ports) in ring_connectivity(n,router).iter()
		{
			for port in ports
			{
				writeln!(con,"{},{},{}",router,neighbour,port).expect("write");
			}
		}
		for (destination,paths) in ring_paths(n,router)
		{
			let count=paths.len();
			for (index,path) in paths.iter().enumerate()
			{
				let text=path.iter().map(|r|r.to_string()).collect::<Vec<_>>().join(" ");
				writeln!(rt,"{},{},{}",router,destination,text).expect("write");
				let weight=if index+1==count { 1.0 } else { 0.0 };
				writeln!(wrt,"{},{},{},{}",router,destination,weight,text).expect("write");
			}
		}
	}
}

///Whether consecutive routers of the path are neighbours in a ring of `n`.
pub fn is_ring_walk(n:usize, path:&[usize]) -> bool
{
	path.windows(2).all(|pair|(pair[0]+1)%n==pair[1] || (pair[1]+1)%n==pair[0])
}

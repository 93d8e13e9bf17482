/*!
caminos-multipath
=====

This crate provides the routing engine of routers that forward packets along precomputed paths over an arbitrary interconnection network graph. Given the current router of a packet, its destination endpoint and its virtual network, the engine decides the output port and virtual channel at every hop, choosing among the precomputed shortest paths and random detours according to local congestion.

The timing of the network, the wiring of links and the flow control are left to the embedding simulator, which consults a [router::GraphRouter] for each packet and keeps the queue lengths it reads.

# Usage

This crate is `caminos-multipath`. To use it add `caminos-multipath` to your dependencies in your project's `Cargo.toml`.

```toml
[dependencies]
caminos-multipath = "0.1"
```

# Public Interface

* [Network] builds every router of a configuration and walks packets through them. Useful for testing tables and for simple embedders.
* [router::GraphRouter] is the engine of a single router. Its `route` method implements the decision of a hop.
* [loader] reads the tables produced by the offline path generator.
* [routing] contains the per-packet state, the tables and the algorithms.

# Configuration Syntax

The configuration files are parsed using the `gramatica` crate. These files are parsed as a `ConfigurationValue` defined as following.

```
pub enum ConfigurationValue
{
	Literal(String),
	Number(f64),
	Object(String,Vec<(String,ConfigurationValue)>),
	Array(Vec<ConfigurationValue>),
	True,
	False,
	None,
}
```

* An `Object` is typed `Name { key1 : value1, key2 : value2, [...] }`.
* An `Array` is typed `[value1, value2, value3, [...]]`.
* A `Number` can be written like 2 or 3.1. Stored as a `f64`.
* A `Literal` is a double-quoted string.
* `True` is written `true` and `False` is written `false`.
* `None` is never produced by the parser. It only stands for a missing value.
* Comments are written as in C, either `//` to the end of the line or `/* */`.

## FromGraph example

The routers are described by a `FromGraph` object.

```
FromGraph
{
	num_routers: 16,//Number of routers in the graph.
	graph_degree: 3,//Ports of each router going to other routers. The ports of the endpoints go after them.
	hosts_per_router: 2,//Endpoints attached to each router.
	num_ports: 5,//Optional. At least graph_degree+hosts_per_router, which is the default.
	max_path_length: 3,//Hops of the longest path in the tables. Mandatory.
	num_vns: 2,//Optional. Defaults to the length of the algorithm array, or 1.
	algorithm: ["ugal","nonadaptive"],//One per virtual network. A single literal is used for all of them.
	vcs_per_vn: [6,3],//Optional. Defaults to what each algorithm requires.
	vn_ugal_bias: 50,//Detour penalty for ugal_threshold. A number or one per virtual network.
	ugal_val_options: 4,//Detours considered by the UGAL variants.
	random_seed: 1,//Router r seeds its generator with random_seed+r.
	csv_files_path: "tables",//Directory with CON.csv, RT.csv and WRT.csv. Defaults to the current directory.
	connectivity: "1,0;2,1",//Optional. Connectivity written inline instead of CON.csv.
}
```

The available algorithms are
* `nonadaptive`: the paths to each destination are used in round-robin.
* `nonadaptive_weighted`: the path is drawn according to the weights in `WRT.csv`.
* `adaptive`: reserved. Routing a packet with it is an error.
* `valiant`: route to a random intermediate router and then to the destination.
* `ugal`: choose between the direct paths and `ugal_val_options` Valiant detours by the queue length times the path length, taking `max_path_length` as the length of the second segment.
* `ugal_precise`: as `ugal`, but using the distance from the intermediate to the destination. Requires the distance table, which is computed from `CON.csv`.
* `ugal_threshold`: direct paths cost their queue length `q`, detours `2q+bias`.

The names may be written with `-` instead of `_`.

Each virtual network needs as many virtual channels as hops its packets can make: `max_path_length` for `nonadaptive`, `nonadaptive_weighted` and `adaptive`; twice that for the others.

*/

pub use quantifiable_derive::Quantifiable;//the derive macro

pub mod error;
pub mod config_parser;
pub mod config;
pub mod quantify;
pub mod matrix;
pub mod topology;
pub mod routing;
pub mod router;
pub mod loader;

use std::path::Path;
use std::rc::Rc;

use tracing::info;

use config_parser::ConfigurationValue;
use router::{GraphRouter,FromGraphParameters,CongestionOracle,PortState};
use routing::PacketRouteState;
use routing::tables::RouterTables;
use loader::load_router_tables;
use quantify::Quantifiable;
use error::Error;

///A hop of a packet: the router it was at and the output it was given.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Hop
{
	pub router: usize,
	pub port: usize,
	pub virtual_channel: usize,
}

///The result of walking a packet through the network.
#[derive(Clone,Debug)]
pub struct Delivery
{
	pub hops: Vec<Hop>,
	///The route state of the packet at its arrival.
	pub route: PacketRouteState,
}

impl Delivery
{
	///The routers visited, from source to destination.
	pub fn routers(&self) -> Vec<usize>
	{
		self.hops.iter().map(|hop|hop.router).collect()
	}
	///The virtual channels of the router-to-router hops.
	pub fn virtual_channels(&self) -> Vec<usize>
	{
		let n=self.hops.len().saturating_sub(1);
		self.hops[..n].iter().map(|hop|hop.virtual_channel).collect()
	}
}

///All the routers of a network, indexed by their identifier.
#[derive(Debug)]
pub struct Network
{
	parameters: FromGraphParameters,
	routers: Vec<GraphRouter>,
}

impl Network
{
	///Build every router of a `FromGraph` configuration, reading their tables.
	///The distance table, when needed, is computed once and shared.
	pub fn new(cv:&ConfigurationValue) -> Result<Network,Error>
	{
		let parameters=FromGraphParameters::from_configuration(cv)?;
		let source=parameters.table_source();
		let requirements=parameters.requirements();
		let distance=if requirements.distance { Some(Rc::new(source.distance_table()?)) } else { None };
		let mut tables=Vec::with_capacity(parameters.num_routers);
		for router in 0..parameters.num_routers
		{
			tables.push(load_router_tables(router,&source,requirements,distance.clone())?);
		}
		Network::from_tables(parameters,tables)
	}
	///Build the network from a configuration file.
	pub fn from_file(path:&Path) -> Result<Network,Error>
	{
		let cv=config::parse_configuration_file(path)?;
		Network::new(&cv)
	}
	///Build the network with tables given for each router in order.
	pub fn from_tables(parameters:FromGraphParameters, tables:Vec<RouterTables>) -> Result<Network,Error>
	{
		if tables.len()!=parameters.num_routers
		{
			return Err(error!(bad_argument).with_message(format!("{} tables given for {} routers",tables.len(),parameters.num_routers)));
		}
		let routers=tables.into_iter().enumerate().map(|(index,t)|GraphRouter::new(index,&parameters,t)).collect::<Result<Vec<_>,Error>>()?;
		let memory:usize=routers.iter().map(|r|r.total_memory()).sum();
		info!(routers=routers.len(),memory=%quantify::human_bytes(memory),"network built");
		Ok(Network{parameters,routers})
	}
	pub fn parameters(&self) -> &FromGraphParameters
	{
		&self.parameters
	}
	pub fn num_routers(&self) -> usize
	{
		self.routers.len()
	}
	///The router with the given index, or `None` beyond the last router.
	pub fn router(&self, index:usize) -> Option<&GraphRouter>
	{
		self.routers.get(index)
	}
	pub fn router_mut(&mut self, index:usize) -> Option<&mut GraphRouter>
	{
		self.routers.get_mut(index)
	}
	///Walk a packet from an endpoint to another, routing it at every router it visits.
	///`congestion[r]` is the congestion seen by router `r`. The last hop leaves by the port of the destination endpoint.
	pub fn deliver<C:CongestionOracle>(&mut self, source:usize, destination:usize, virtual_network:usize, congestion:&[C]) -> Result<Delivery,Error>
	{
		if congestion.len()!=self.routers.len()
		{
			return Err(error!(bad_argument).with_message(format!("congestion given for {} routers instead of {}",congestion.len(),self.routers.len())));
		}
		let hosts=self.parameters.hosts_per_router;
		let num_endpoints=self.routers.len()*hosts;
		if source>=num_endpoints || destination>=num_endpoints
		{
			return Err(error!(bad_argument).with_message(format!("endpoints {} and {} must be below {}",source,destination,num_endpoints)));
		}
		let mut current=source/hosts;
		let (mut packet,mut virtual_channel)=self.routers[current].process_input(destination,virtual_network)?;
		let mut port=self.routers[current].dest_local_port(source);
		let mut hops=vec![];
		//Each router-to-router hop consumes a virtual channel, so the packet cannot make more hops than channels.
		let limit=self.routers[current].num_virtual_channels()+1;
		while hops.len()<limit
		{
			let decision=self.routers[current].route_packet(port,virtual_channel,&mut packet,&congestion[current])?;
			hops.push(Hop{router:current,port:decision.port,virtual_channel:decision.virtual_channel});
			match self.routers[current].port_state(decision.port)
			{
				PortState::RouterToEndpoint => return Ok(Delivery{hops,route:packet}),
				PortState::RouterToRouter => (),
				PortState::Unconnected => return Err(error!(path_integrity,current,packet.hops,packet.path.clone())),
			}
			let next=packet.path[packet.hops];
			//The input port is informative only. Links without a known way back keep the output port.
			port=self.routers[next].tables().connectivity().port(current).unwrap_or(decision.port);
			current=next;
			virtual_channel=decision.virtual_channel;
		}
		Err(error!(path_integrity,current,packet.hops,packet.path.clone()).with_message("the packet did not reach its destination".to_string()))
	}
}

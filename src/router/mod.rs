/*!

The router engine. A [GraphRouter] owns the tables of one router, its random generator and the algorithm of each virtual network, and decides the output port and virtual channel of the packets going through it.

The ports of a router are numbered as
* `[0,graph_degree)` towards other routers, as given by the connectivity,
* `[graph_degree,graph_degree+hosts_per_router)` towards its endpoints,
* the rest, if any, unconnected.

The endpoint `e` is attached to router `e/hosts_per_router`.

The virtual channels are split among the virtual networks in order: the first virtual network uses `[0,vcs_per_vn[0])`, the second the next `vcs_per_vn[1]` and so on.

*/

use std::mem::size_of;
use std::path::PathBuf;

use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use quantifiable_derive::Quantifiable;//the derive macro
use tracing::{warn,debug};

use crate::config_parser::ConfigurationValue;
use crate::config::per_virtual_network;
use crate::routing::{RoutingAlgorithm,RoutingContext,PacketRouteState,RouteDecision,AlgorithmKind,new_routing_algorithm};
use crate::routing::tables::RouterTables;
use crate::loader::{TableSource,TableRequirements,load_router_tables};
use crate::quantify::Quantifiable;
use crate::error::Error;
use crate::{error,match_object};

///Destination of the untimed data sent to every endpoint.
pub const UNTIMED_BROADCAST: usize = usize::MAX;

///The queue length of each output (port, virtual channel) of a router.
pub trait CongestionOracle
{
	fn queue_length(&self, port:usize, virtual_channel:usize) -> usize;
	///The (ports, virtual channels) covered, when known, to be checked against the router.
	fn dimensions(&self) -> Option<(usize,usize)>
	{
		None
	}
}

///A network without traffic. Every queue is empty.
#[derive(Clone,Copy,Debug,Default)]
pub struct IdleNetwork;

impl CongestionOracle for IdleNetwork
{
	fn queue_length(&self, _port:usize, _virtual_channel:usize) -> usize
	{
		0
	}
}

///One counter per output (port, virtual channel), refreshed by the link layer every cycle.
#[derive(Clone,Debug,Quantifiable)]
pub struct OutputQueueLengths
{
	num_virtual_channels: usize,
	lengths: Vec<usize>,
}

impl OutputQueueLengths
{
	pub fn new(num_ports:usize, num_virtual_channels:usize) -> OutputQueueLengths
	{
		OutputQueueLengths{
			num_virtual_channels,
			lengths: vec![0;num_ports*num_virtual_channels],
		}
	}
	pub fn num_ports(&self) -> usize
	{
		if self.num_virtual_channels==0 { 0 } else { self.lengths.len()/self.num_virtual_channels }
	}
	pub fn num_virtual_channels(&self) -> usize
	{
		self.num_virtual_channels
	}
	pub fn set(&mut self, port:usize, virtual_channel:usize, length:usize) -> Result<(),Error>
	{
		if virtual_channel>=self.num_virtual_channels || port>=self.num_ports()
		{
			return Err(error!(bad_argument).with_message(format!("queue ({},{}) outside of {} ports with {} virtual channels",port,virtual_channel,self.num_ports(),self.num_virtual_channels)));
		}
		self.lengths[port*self.num_virtual_channels+virtual_channel]=length;
		Ok(())
	}
	///Replace all the lengths, given port major.
	pub fn refresh(&mut self, lengths:&[usize]) -> Result<(),Error>
	{
		if lengths.len()!=self.lengths.len()
		{
			return Err(error!(bad_argument).with_message(format!("{} queue lengths given for {} queues",lengths.len(),self.lengths.len())));
		}
		self.lengths.copy_from_slice(lengths);
		Ok(())
	}
}

impl CongestionOracle for OutputQueueLengths
{
	fn queue_length(&self, port:usize, virtual_channel:usize) -> usize
	{
		self.lengths.get(port*self.num_virtual_channels+virtual_channel).copied().unwrap_or(0)
	}
	fn dimensions(&self) -> Option<(usize,usize)>
	{
		Some((self.num_ports(),self.num_virtual_channels))
	}
}

///What is connected to a port.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum PortState
{
	RouterToRouter,
	RouterToEndpoint,
	Unconnected,
}

///A range of virtual channels with the algorithm routing its packets.
#[derive(Debug)]
pub struct VirtualNetwork
{
	pub start_vc: usize,
	pub num_vcs: usize,
	///Detour penalty of `ugal_threshold`.
	pub bias: usize,
	pub algorithm: Box<dyn RoutingAlgorithm>,
}

///The parameters of a `FromGraph` configuration, shared by all the routers.
#[derive(Clone,Debug)]
pub struct FromGraphParameters
{
	pub num_routers: usize,
	pub graph_degree: usize,
	pub hosts_per_router: usize,
	pub num_ports: usize,
	pub max_path_length: usize,
	pub algorithms: Vec<AlgorithmKind>,
	///Virtual channels of each virtual network. `None` to use what each algorithm requires.
	pub vcs_per_vn: Option<Vec<usize>>,
	pub vn_ugal_bias: Vec<usize>,
	///Number of detours considered by the UGAL variants.
	pub ugal_val_options: usize,
	///Router `r` seeds its generator with `random_seed+r`, wrapping around `u64::MAX`.
	pub random_seed: u64,
	pub csv_files_path: Option<PathBuf>,
	pub connectivity: Option<String>,
}

impl FromGraphParameters
{
	pub fn from_configuration(cv:&ConfigurationValue) -> Result<FromGraphParameters,Error>
	{
		let mut num_routers=None;
		let mut graph_degree=None;
		let mut hosts_per_router=None;
		let mut num_ports=None;
		let mut max_path_length=None;
		let mut num_vns=None;
		let mut algorithm=None;
		let mut vcs_per_vn=None;
		let mut vn_ugal_bias=None;
		let mut ugal_val_options=None;
		let mut random_seed=None;
		let mut csv_files_path=None;
		let mut connectivity=None;
		match_object!(cv,"FromGraph",value,
			"num_routers" | "graph_num_vertices" => num_routers=Some(value.as_usize()?),
			"graph_degree" => graph_degree=Some(value.as_usize()?),
			"hosts_per_router" => hosts_per_router=Some(value.as_usize()?),
			"num_ports" => num_ports=Some(value.as_usize()?),
			"max_path_length" => max_path_length=Some(value.as_usize()?),
			"num_vns" => num_vns=Some(value.as_usize()?),
			"algorithm" => algorithm=Some(value),
			"vcs_per_vn" => vcs_per_vn=Some(value),
			"vn_ugal_bias" => vn_ugal_bias=Some(value),
			"ugal_val_options" | "num_VAL" => ugal_val_options=Some(value.as_usize()?),
			"random_seed" => random_seed=Some(value.as_usize()? as u64),
			"csv_files_path" => csv_files_path=Some(PathBuf::from(value.as_str()?)),
			"connectivity" => connectivity=Some(value.as_str()?.to_string()),
		);
		let num_routers=num_routers.ok_or_else(||error!(ill_formed_configuration,cv.clone()).with_message("There were no num_routers".to_string()))?;
		let graph_degree=graph_degree.ok_or_else(||error!(ill_formed_configuration,cv.clone()).with_message("There were no graph_degree".to_string()))?;
		let max_path_length=match max_path_length
		{
			Some(0) | None => return Err(error!(ill_formed_configuration,cv.clone()).with_message("max_path_length must be given and positive".to_string())),
			Some(x) => x,
		};
		let hosts_per_router=hosts_per_router.unwrap_or_else(||{
			warn!("hosts_per_router not given, using 1");
			1
		});
		if hosts_per_router==0
		{
			return Err(error!(ill_formed_configuration,cv.clone()).with_message("hosts_per_router must be positive, every router has at least an endpoint".to_string()));
		}
		let required_ports=graph_degree+hosts_per_router;
		let num_ports=num_ports.unwrap_or(required_ports);
		if num_ports<required_ports
		{
			return Err(error!(port_count_mismatch,required_ports,num_ports));
		}
		let num_vns=match (num_vns,algorithm)
		{
			(Some(n),_) => n,
			(None,Some(&ConfigurationValue::Array(ref list))) => list.len(),
			(None,_) => 1,
		};
		if num_vns==0
		{
			return Err(error!(ill_formed_configuration,cv.clone()).with_message("there must be at least one virtual network".to_string()));
		}
		let algorithms=match per_virtual_network(algorithm,num_vns,|v|AlgorithmKind::from_tag(v.as_str()?))?
		{
			Some(list) => list,
			None =>
			{
				warn!("algorithm not given, using nonadaptive");
				vec![AlgorithmKind::Nonadaptive;num_vns]
			},
		};
		let vcs_per_vn=per_virtual_network(vcs_per_vn,num_vns,|v|v.as_usize())?;
		let vn_ugal_bias=match per_virtual_network(vn_ugal_bias,num_vns,|v|v.as_usize())?
		{
			Some(list) => list,
			None =>
			{
				if algorithms.contains(&AlgorithmKind::UgalThreshold)
				{
					warn!("vn_ugal_bias not given, using 50");
				}
				vec![50;num_vns]
			},
		};
		let ugal_val_options=ugal_val_options.unwrap_or_else(||{
			if algorithms.iter().any(|kind|matches!(kind,AlgorithmKind::Ugal|AlgorithmKind::UgalPrecise|AlgorithmKind::UgalThreshold))
			{
				warn!("ugal_val_options not given, using 4");
			}
			4
		});
		if csv_files_path.is_none()
		{
			warn!("csv_files_path not given, using the current directory");
		}
		Ok(FromGraphParameters{
			num_routers,
			graph_degree,
			hosts_per_router,
			num_ports,
			max_path_length,
			algorithms,
			vcs_per_vn,
			vn_ugal_bias,
			ugal_val_options,
			random_seed: random_seed.unwrap_or(1),
			csv_files_path: Some(csv_files_path.unwrap_or_else(||PathBuf::from("."))),
			connectivity,
		})
	}
	pub fn num_vns(&self) -> usize
	{
		self.algorithms.len()
	}
	///Where to read the tables from.
	pub fn table_source(&self) -> TableSource
	{
		TableSource{
			csv_files_path: self.csv_files_path.clone(),
			inline_connectivity: self.connectivity.clone(),
			num_routers: self.num_routers,
			graph_degree: self.graph_degree,
			max_path_length: self.max_path_length,
		}
	}
	///The optional tables required by the algorithms.
	pub fn requirements(&self) -> TableRequirements
	{
		let algorithms:Vec<Box<dyn RoutingAlgorithm>>=self.algorithms.iter().map(|&kind|new_routing_algorithm(kind)).collect();
		TableRequirements{
			weighted: algorithms.iter().any(|a|a.requires_weighted_table()),
			distance: algorithms.iter().any(|a|a.requires_distance_table()),
		}
	}
}

///A router routing over precomputed paths.
#[derive(Debug)]
pub struct GraphRouter
{
	router: usize,
	num_routers: usize,
	num_ports: usize,
	graph_degree: usize,
	hosts_per_router: usize,
	max_path_length: usize,
	ugal_val_options: usize,
	tables: RouterTables,
	rng: StdRng,
	virtual_networks: Vec<VirtualNetwork>,
}

impl Quantifiable for GraphRouter
{
	fn total_memory(&self) -> usize
	{
		size_of::<GraphRouter>() + self.tables.total_memory() + self.virtual_networks.len()*size_of::<VirtualNetwork>()
	}
}

impl GraphRouter
{
	///Build the router `router` with the given tables, checking them against the parameters.
	pub fn new(router:usize, parameters:&FromGraphParameters, tables:RouterTables) -> Result<GraphRouter,Error>
	{
		if router>=parameters.num_routers || tables.router()!=router
		{
			return Err(error!(bad_argument).with_message(format!("cannot build router {} of {} with the tables of router {}",router,parameters.num_routers,tables.router())));
		}
		if parameters.hosts_per_router==0
		{
			return Err(error!(bad_argument).with_message(format!("router {} has no endpoint ports",router)));
		}
		tables.validate(parameters.num_routers,parameters.max_path_length)?;
		let mut virtual_networks=Vec::with_capacity(parameters.num_vns());
		let mut start_vc=0;
		for (index,&kind) in parameters.algorithms.iter().enumerate()
		{
			let algorithm=new_routing_algorithm(kind);
			let required=algorithm.required_virtual_channels(parameters.max_path_length);
			let num_vcs=match parameters.vcs_per_vn
			{
				Some(ref list) => list[index],
				None => required,
			};
			if num_vcs<required
			{
				return Err(error!(bad_argument).with_message(format!("virtual network {} has {} virtual channels but {} requires {}",index,num_vcs,algorithm.name(),required)));
			}
			if num_vcs>required && router==0
			{
				warn!(virtual_network=index,num_vcs,required,"virtual network has more virtual channels than its algorithm uses");
			}
			if algorithm.requires_weighted_table() && tables.weighted().is_none()
			{
				return Err(error!(missing_table,Some(router),"weighted routing"));
			}
			if algorithm.requires_distance_table() && !tables.has_distance()
			{
				return Err(error!(missing_table,Some(router),"distance"));
			}
			if algorithm.detour_candidates()
			{
				check_detour_candidates(&tables,parameters.ugal_val_options)?;
			}
			virtual_networks.push(VirtualNetwork{
				start_vc,
				num_vcs,
				bias: parameters.vn_ugal_bias[index],
				algorithm,
			});
			start_vc+=num_vcs;
		}
		Ok(GraphRouter{
			router,
			num_routers: parameters.num_routers,
			num_ports: parameters.num_ports,
			graph_degree: parameters.graph_degree,
			hosts_per_router: parameters.hosts_per_router,
			max_path_length: parameters.max_path_length,
			ugal_val_options: parameters.ugal_val_options,
			tables,
			rng: StdRng::seed_from_u64(parameters.random_seed.wrapping_add(router as u64)),
			virtual_networks,
		})
	}
	///Build a router from a `FromGraph` configuration, loading its tables.
	pub fn from_configuration(router:usize, cv:&ConfigurationValue) -> Result<GraphRouter,Error>
	{
		let parameters=FromGraphParameters::from_configuration(cv)?;
		let tables=load_router_tables(router,&parameters.table_source(),parameters.requirements(),None)?;
		GraphRouter::new(router,&parameters,tables)
	}
	pub fn index(&self) -> usize
	{
		self.router
	}
	pub fn tables(&self) -> &RouterTables
	{
		&self.tables
	}
	pub fn num_ports(&self) -> usize
	{
		self.num_ports
	}
	pub fn virtual_network(&self, index:usize) -> Option<&VirtualNetwork>
	{
		self.virtual_networks.get(index)
	}
	///The number of virtual channels of each virtual network.
	pub fn vcs_per_vn(&self) -> Vec<usize>
	{
		self.virtual_networks.iter().map(|vn|vn.num_vcs).collect()
	}
	pub fn num_virtual_channels(&self) -> usize
	{
		self.virtual_networks.iter().map(|vn|vn.num_vcs).sum()
	}
	///A congestion array matching the ports and virtual channels of this router.
	pub fn new_output_queue_lengths(&self) -> OutputQueueLengths
	{
		OutputQueueLengths::new(self.num_ports,self.num_virtual_channels())
	}
	///The router an endpoint is attached to.
	pub fn dest_router(&self, endpoint:usize) -> usize
	{
		endpoint/self.hosts_per_router
	}
	///The port of its router an endpoint is attached to.
	pub fn dest_local_port(&self, endpoint:usize) -> usize
	{
		self.graph_degree + endpoint%self.hosts_per_router
	}
	pub fn port_state(&self, port:usize) -> PortState
	{
		if port<self.graph_degree
		{
			PortState::RouterToRouter
		}
		else if port<self.graph_degree+self.hosts_per_router
		{
			PortState::RouterToEndpoint
		}
		else
		{
			PortState::Unconnected
		}
	}
	///The endpoint attached to a port, if any.
	pub fn endpoint_id(&self, port:usize) -> Option<usize>
	{
		match self.port_state(port)
		{
			PortState::RouterToEndpoint => Some(self.router*self.hosts_per_router+port-self.graph_degree),
			_ => None,
		}
	}
	///Admit a packet from one of the endpoints of this router. Returns its route state and its initial virtual channel, the first of its virtual network.
	pub fn process_input(&self, destination:usize, virtual_network:usize) -> Result<(PacketRouteState,usize),Error>
	{
		let vn=self.virtual_networks.get(virtual_network).ok_or_else(||error!(bad_argument).with_message(format!("there is no virtual network {}, only {}",virtual_network,self.virtual_networks.len())))?;
		Ok((PacketRouteState::new(destination,virtual_network),vn.start_vc))
	}
	///Decide the output of a packet that arrived by `port` and `virtual_channel` and goes to `destination_router`.
	///Packets for this router leave by the port of their endpoint keeping their virtual channel, without consulting tables nor random numbers.
	pub fn route(&mut self, port:usize, virtual_channel:usize, packet:&mut PacketRouteState, destination_router:usize, congestion:&dyn CongestionOracle) -> Result<RouteDecision,Error>
	{
		if destination_router==self.router
		{
			let local=self.dest_local_port(packet.destination);
			debug!(router=self.router,input_port=port,port=local,"local delivery");
			return Ok(RouteDecision{port:local,virtual_channel});
		}
		if let Some((ports,vcs))=congestion.dimensions()
		{
			if ports!=self.num_ports || vcs!=self.num_virtual_channels()
			{
				return Err(error!(bad_argument).with_message(format!("congestion given for {} ports with {} virtual channels, but router {} has {} ports with {} virtual channels",ports,vcs,self.router,self.num_ports,self.num_virtual_channels())));
			}
		}
		let vn=self.virtual_networks.get(packet.virtual_network).ok_or_else(||error!(bad_argument).with_message(format!("packet in virtual network {} of {}",packet.virtual_network,self.virtual_networks.len())))?;
		let mut context=RoutingContext{
			router: self.router,
			num_routers: self.num_routers,
			tables: &mut self.tables,
			rng: &mut self.rng,
			congestion,
			start_vc: vn.start_vc,
			num_vcs: vn.num_vcs,
			bias: vn.bias,
			max_path_length: self.max_path_length,
			num_val: self.ugal_val_options,
		};
		vn.algorithm.route(&mut context,packet,destination_router)
	}
	///Route a packet towards the router of its destination endpoint.
	pub fn route_packet(&mut self, port:usize, virtual_channel:usize, packet:&mut PacketRouteState, congestion:&dyn CongestionOracle) -> Result<RouteDecision,Error>
	{
		let destination_router=self.dest_router(packet.destination);
		self.route(port,virtual_channel,packet,destination_router,congestion)
	}
	///Route data exchanged before the simulation starts, as if the network were idle. Returns the output ports.
	pub fn route_untimed(&mut self, port:usize, packet:&mut PacketRouteState) -> Result<Vec<usize>,Error>
	{
		if packet.destination==UNTIMED_BROADCAST
		{
			return Err(error!(not_implemented,"untimed broadcast".to_string()));
		}
		let decision=self.route_packet(port,0,packet,&IdleNetwork)?;
		Ok(vec![decision.port])
	}
}

///Check that towards every destination there are at least `num_val` detours, counting paths to routers other than this one and the destination.
fn check_detour_candidates(tables:&RouterTables, num_val:usize) -> Result<(),Error>
{
	let total:usize=tables.routing().iter().map(|(_,set)|set.paths().len()).sum();
	for (destination,set) in tables.routing().iter()
	{
		let available=total-set.paths().len();
		if available<num_val
		{
			return Err(error!(insufficient_detour_candidates,tables.router(),num_val,available).with_message(format!("towards router {}",destination)));
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::config::parse_configuration;
	use crate::routing::test_support::ring_tables;

	fn parameters(source:&str) -> FromGraphParameters
	{
		FromGraphParameters::from_configuration(&parse_configuration(source).expect("parses")).expect("valid parameters")
	}
	#[test]
	fn virtual_channel_layout()
	{
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:1, max_path_length:2, algorithm:[\"nonadaptive\",\"valiant\",\"ugal-threshold\"], ugal_val_options:1}");
		let router=GraphRouter::new(1,&p,ring_tables(4,1)).expect("valid router");
		assert_eq!(router.vcs_per_vn(),vec![2,4,4]);
		assert_eq!(router.virtual_network(2).expect("vn").start_vc,6);
		assert_eq!(router.num_virtual_channels(),10);
		let (packet,vc)=router.process_input(0,1).expect("valid vn");
		assert_eq!(vc,2);
		assert_eq!(packet.hops,0);
		assert!(router.process_input(0,3).is_err());
	}
	#[test]
	fn port_helpers()
	{
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:2, num_ports:5, max_path_length:2}");
		let router=GraphRouter::new(2,&p,ring_tables(4,2)).expect("valid router");
		assert_eq!(router.port_state(1),PortState::RouterToRouter);
		assert_eq!(router.port_state(3),PortState::RouterToEndpoint);
		assert_eq!(router.port_state(4),PortState::Unconnected);
		assert_eq!(router.endpoint_id(2),Some(4));
		assert_eq!(router.endpoint_id(3),Some(5));
		assert_eq!(router.endpoint_id(0),None);
		assert_eq!(router.dest_router(7),3);
		assert_eq!(router.dest_local_port(7),3);
	}
	#[test]
	fn configuration_errors()
	{
		let parse=|s:&str|FromGraphParameters::from_configuration(&parse_configuration(s).expect("parses"));
		assert!(parse("FromGraph{num_routers:4, graph_degree:2, max_path_length:2, algorithm:\"dragonfly\"}").unwrap_err().is_configuration_error());
		assert!(parse("FromGraph{num_routers:4, graph_degree:2, max_path_length:2, num_vns:3, algorithm:[\"ugal\",\"valiant\"]}").is_err());
		assert!(parse("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:2, num_ports:3, max_path_length:2}").unwrap_err().is_configuration_error());
		assert!(parse("FromGraph{num_routers:4, graph_degree:2}").is_err());
		assert!(parse("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:0, max_path_length:2}").unwrap_err().is_configuration_error());
		let mut p=parameters("FromGraph{num_routers:4, graph_degree:2, max_path_length:2}");
		p.hosts_per_router=0;
		assert!(GraphRouter::new(0,&p,ring_tables(4,0)).unwrap_err().is_configuration_error());
		assert!(parse("FromGraph{num_routers:4, graph_degree:2, max_path_length:2, colour:1}").is_err());
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, max_path_length:2, algorithm:\"valiant\", vcs_per_vn:3}");
		assert!(GraphRouter::new(0,&p,ring_tables(4,0)).unwrap_err().is_configuration_error());
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, max_path_length:2, algorithm:\"ugal_precise\"}");
		assert!(GraphRouter::new(0,&p,ring_tables(4,0)).unwrap_err().is_configuration_error());
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, max_path_length:2, algorithm:\"ugal\", ugal_val_options:4}");
		assert!(GraphRouter::new(0,&p,ring_tables(4,0)).unwrap_err().is_configuration_error());
	}
	#[test]
	fn local_shortcut()
	{
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:2, max_path_length:2}");
		let mut router=GraphRouter::new(3,&p,ring_tables(4,3)).expect("valid router");
		let mut packet=PacketRouteState::new(7,0);
		let decision=router.route_packet(0,1,&mut packet,&IdleNetwork).expect("local");
		assert_eq!(decision,RouteDecision{port:3,virtual_channel:1});
		assert_eq!(packet.hops,0);
		assert!(packet.path.is_empty());
		assert_eq!(router.tables().paths_for(1).expect("entry").cursor(),0);
	}
	#[test]
	fn untimed_routing()
	{
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:1, max_path_length:2}");
		let mut router=GraphRouter::new(0,&p,ring_tables(4,0)).expect("valid router");
		let mut packet=PacketRouteState::new(1,0);
		assert_eq!(router.route_untimed(2,&mut packet).expect("routable"),vec![0]);
		let mut broadcast=PacketRouteState::new(UNTIMED_BROADCAST,0);
		assert!(router.route_untimed(2,&mut broadcast).is_err());
	}
	#[test]
	fn seeds_wrap_around()
	{
		use ::rand::Rng;
		let mut p=parameters("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:1, max_path_length:2, random_seed:18446744073709549568}");
		assert_eq!(p.random_seed,u64::MAX-2047);
		p.random_seed=u64::MAX;
		let mut last=GraphRouter::new(3,&p,ring_tables(4,3)).expect("valid router");
		p.random_seed=1;
		let mut first=GraphRouter::new(0,&p,ring_tables(4,0)).expect("valid router");
		//u64::MAX+3 wraps to 2, which is the seed of router 1 when random_seed is 1.
		let mut second=GraphRouter::new(1,&p,ring_tables(4,1)).expect("valid router");
		let draws=|router:&mut GraphRouter|(0..8).map(|_|router.rng.gen::<u64>()).collect::<Vec<u64>>();
		let last_draws=draws(&mut last);
		assert_eq!(last_draws,draws(&mut second));
		assert_ne!(last_draws,draws(&mut first));
	}
	#[test]
	fn congestion_dimensions_are_checked()
	{
		let p=parameters("FromGraph{num_routers:4, graph_degree:2, hosts_per_router:1, max_path_length:2}");
		let mut router=GraphRouter::new(0,&p,ring_tables(4,0)).expect("valid router");
		let good=router.new_output_queue_lengths();
		assert_eq!((good.num_ports(),good.num_virtual_channels()),(3,2));
		let bad=OutputQueueLengths::new(3,5);
		let mut packet=PacketRouteState::new(2,0);
		assert!(router.route_packet(2,0,&mut packet,&bad).is_err());
		let mut packet=PacketRouteState::new(2,0);
		assert!(router.route_packet(2,0,&mut packet,&good).is_ok());
	}
}

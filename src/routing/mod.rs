/*!

The routing algorithms of a router. Each virtual network is bound to one [RoutingAlgorithm] when the router is built. At every hop the router asks it for the output port and virtual channel of a packet, handing it a [RoutingContext] with the router's own tables, random generator and congestion signal.

All the algorithms follow precomputed paths stored in the [PacketRouteState]. The virtual channel used is the number of hops already traversed, offset by the first channel of the virtual network, which makes the channel sequence of a packet strictly increasing and avoids deadlock.

* `nonadaptive`: take the paths to the destination in round-robin order.
* `nonadaptive_weighted`: draw a path with probability given by its weight.
* `adaptive`: reserved name, not implemented.
* `valiant`: go first to a random intermediate router and then to the destination.
* `ugal`, `ugal_precise`, `ugal_threshold`: choose between direct paths and some Valiant detours according to the local queue lengths.

*/

pub mod tables;
pub mod multipath;
pub mod valiant;
pub mod ugal;

use std::fmt::Debug;

use ::rand::rngs::StdRng;
use ::rand::Rng;
use quantifiable_derive::Quantifiable;//the derive macro
use tracing::trace;

use crate::quantify::Quantifiable;
use crate::router::CongestionOracle;
use crate::error::Error;
use crate::error;
use self::tables::RouterTables;
use self::multipath::{Nonadaptive,NonadaptiveWeighted,Adaptive};
use self::valiant::Valiant;
use self::ugal::{Ugal,UgalVariant};

///Where a packet is in its optional detour.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Quantifiable)]
pub enum DetourPhase
{
	///No decision has been taken yet, or the packet goes directly.
	NotDetouring,
	///The packet follows the first segment towards the given intermediate router.
	EnRouteToIntermediate(usize),
	///The packet follows its last segment towards the destination.
	ReturnLeg,
}

///The routing state carried by a packet. It is owned by the packet and mutated by the routers it visits.
#[derive(Clone,Debug,Quantifiable)]
pub struct PacketRouteState
{
	///The destination endpoint.
	pub destination: usize,
	pub virtual_network: usize,
	///Routers of the selected route, starting at the source router. Built at the first hop.
	pub path: Vec<usize>,
	///Number of router-to-router hops already decided.
	pub hops: usize,
	pub detour_phase: DetourPhase,
	///Value of `hops` when the detour reached its intermediate router.
	pub detour_offset: usize,
}

impl PacketRouteState
{
	pub fn new(destination:usize, virtual_network:usize) -> PacketRouteState
	{
		PacketRouteState{
			destination,
			virtual_network,
			path: vec![],
			hops: 0,
			detour_phase: DetourPhase::NotDetouring,
			detour_offset: 0,
		}
	}
}

///The output of a routing decision.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct RouteDecision
{
	pub port: usize,
	pub virtual_channel: usize,
}

///Everything of the current router an algorithm may consult or update.
pub struct RoutingContext<'a>
{
	pub router: usize,
	pub num_routers: usize,
	pub tables: &'a mut RouterTables,
	pub rng: &'a mut StdRng,
	pub congestion: &'a dyn CongestionOracle,
	///First virtual channel of the packet's virtual network.
	pub start_vc: usize,
	///Number of virtual channels of the packet's virtual network.
	pub num_vcs: usize,
	///Penalty of the detours in `ugal_threshold`.
	pub bias: usize,
	pub max_path_length: usize,
	///Number of detour candidates considered by the UGAL variants.
	pub num_val: usize,
}

///A routing algorithm bound to a virtual network.
pub trait RoutingAlgorithm : Debug
{
	///The configuration tag of the algorithm.
	fn name(&self) -> &'static str;
	///Compute the output port and virtual channel of the packet at the current router, updating its route state.
	///`destination_router` is never the current router.
	fn route(&self, context:&mut RoutingContext, packet:&mut PacketRouteState, destination_router:usize) -> Result<RouteDecision,Error>;
	///Whether the routes may go through an intermediate router, doubling the length of the longest route.
	fn is_two_phase(&self) -> bool
	{
		false
	}
	///Number of virtual channels required to route with paths of at most `max_path_length` hops.
	fn required_virtual_channels(&self, max_path_length:usize) -> usize
	{
		if self.is_two_phase() { 2*max_path_length } else { max_path_length }
	}
	fn requires_weighted_table(&self) -> bool
	{
		false
	}
	fn requires_distance_table(&self) -> bool
	{
		false
	}
	///Whether the algorithm draws detour candidates and needs enough of them for every destination.
	fn detour_candidates(&self) -> bool
	{
		false
	}
}

///The algorithms available by name.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum AlgorithmKind
{
	Nonadaptive,
	NonadaptiveWeighted,
	Adaptive,
	Valiant,
	Ugal,
	UgalPrecise,
	UgalThreshold,
}

impl AlgorithmKind
{
	///Read a configuration tag. `-` and `_` are interchangeable.
	pub fn from_tag(tag:&str) -> Result<AlgorithmKind,Error>
	{
		match tag.replace('-',"_").as_ref()
		{
			"nonadaptive" => Ok(AlgorithmKind::Nonadaptive),
			"nonadaptive_weighted" => Ok(AlgorithmKind::NonadaptiveWeighted),
			"adaptive" => Ok(AlgorithmKind::Adaptive),
			"valiant" => Ok(AlgorithmKind::Valiant),
			"ugal" => Ok(AlgorithmKind::Ugal),
			"ugal_precise" => Ok(AlgorithmKind::UgalPrecise),
			"ugal_threshold" => Ok(AlgorithmKind::UgalThreshold),
			_ => Err(error!(unknown_algorithm,tag.to_string())),
		}
	}
}

///Build the algorithm of the given kind.
pub fn new_routing_algorithm(kind:AlgorithmKind) -> Box<dyn RoutingAlgorithm>
{
	match kind
	{
		AlgorithmKind::Nonadaptive => Box::new(Nonadaptive{}),
		AlgorithmKind::NonadaptiveWeighted => Box::new(NonadaptiveWeighted{}),
		AlgorithmKind::Adaptive => Box::new(Adaptive{}),
		AlgorithmKind::Valiant => Box::new(Valiant{}),
		AlgorithmKind::Ugal => Box::new(Ugal::new(UgalVariant::Plain)),
		AlgorithmKind::UgalPrecise => Box::new(Ugal::new(UgalVariant::Precise)),
		AlgorithmKind::UgalThreshold => Box::new(Ugal::new(UgalVariant::Threshold)),
	}
}

///Forward the packet one hop along its path.
///The virtual channel is `start_vc+hops`; then `hops` is incremented and the port towards `path[hops]` is returned.
pub fn forward(context:&mut RoutingContext, packet:&mut PacketRouteState) -> Result<RouteDecision,Error>
{
	if packet.hops>=context.num_vcs
	{
		return Err(error!(virtual_channel_exhausted,context.router,context.start_vc+packet.hops,context.start_vc,context.num_vcs));
	}
	if packet.hops+1>=packet.path.len() || packet.path[packet.hops]!=context.router
	{
		return Err(error!(path_integrity,context.router,packet.hops,packet.path.clone()));
	}
	let virtual_channel=context.start_vc+packet.hops;
	packet.hops+=1;
	let next=packet.path[packet.hops];
	let port=context.tables.port_for(next)?;
	trace!(router=context.router,port,virtual_channel,hops=packet.hops,"forward");
	Ok(RouteDecision{port,virtual_channel})
}

///When the packet reaches its intermediate router, append the path from there to the destination and start the return leg.
///The appended path is taken in round-robin from the current router's table.
pub fn advance_detour(context:&mut RoutingContext, packet:&mut PacketRouteState, destination_router:usize) -> Result<(),Error>
{
	if let DetourPhase::EnRouteToIntermediate(target) = packet.detour_phase
	{
		if target==context.router
		{
			let second=context.tables.next_path(destination_router)?;
			packet.path.extend_from_slice(&second[1..]);
			packet.detour_offset=packet.hops;
			packet.detour_phase=DetourPhase::ReturnLeg;
		}
	}
	Ok(())
}

///A router other than the current one, uniformly at random.
pub fn random_other_router(context:&mut RoutingContext) -> Result<usize,Error>
{
	if context.num_routers<2
	{
		return Err(error!(bad_argument).with_message("detours require at least two routers".to_string()));
	}
	let r=context.rng.gen_range(0..context.num_routers-1);
	Ok(if r>=context.router { r+1 } else { r })
}

///Check that a packet without a detour decision is at its first hop.
pub fn check_fresh(context:&RoutingContext, packet:&PacketRouteState) -> Result<(),Error>
{
	if packet.hops!=0
	{
		return Err(error!(path_integrity,context.router,packet.hops,packet.path.clone()));
	}
	Ok(())
}

/*!

Algorithms following a single path from source to destination, chosen at the first hop among the precomputed ones.

*/

use ::rand::Rng;
use tracing::debug;

use super::{RoutingAlgorithm,RoutingContext,PacketRouteState,RouteDecision,forward};
use crate::error::Error;
use crate::error;

///Take the paths to each destination in round-robin order. Each first-hop decision towards a destination advances its cursor once.
#[derive(Debug)]
pub struct Nonadaptive
{
}

impl RoutingAlgorithm for Nonadaptive
{
	fn name(&self) -> &'static str
	{
		"nonadaptive"
	}
	fn route(&self, context:&mut RoutingContext, packet:&mut PacketRouteState, destination_router:usize) -> Result<RouteDecision,Error>
	{
		if packet.hops==0
		{
			packet.path=context.tables.next_path(destination_router)?;
			debug!(router=context.router,destination_router,path=?packet.path,"nonadaptive path");
		}
		forward(context,packet)
	}
}

///Draw the path at the first hop with probability proportional to the weights of the weighted table.
///The weights are not normalized: a draw in [0,1) selects the first path whose cumulative weight reaches it.
#[derive(Debug)]
pub struct NonadaptiveWeighted
{
}

impl RoutingAlgorithm for NonadaptiveWeighted
{
	fn name(&self) -> &'static str
	{
		"nonadaptive_weighted"
	}
	fn route(&self, context:&mut RoutingContext, packet:&mut PacketRouteState, destination_router:usize) -> Result<RouteDecision,Error>
	{
		if packet.hops==0
		{
			let dice:f64=context.rng.gen();
			let list=context.tables.weighted_paths_for(destination_router)?;
			let mut sum=0.0;
			let mut selected=None;
			for &(weight,ref path) in list
			{
				sum+=weight;
				if dice<=sum
				{
					selected=Some(path.clone());
					break;
				}
			}
			packet.path=selected.ok_or_else(||error!(missing_entry,context.router,destination_router,"weighted routing").with_message(format!("no path selected by the draw {} with total weight {}",dice,sum)))?;
			debug!(router=context.router,destination_router,dice,path=?packet.path,"weighted path");
		}
		forward(context,packet)
	}
	fn requires_weighted_table(&self) -> bool
	{
		true
	}
}

///Reserved for adaptive multipath routing. Any packet routed with it fails.
#[derive(Debug)]
pub struct Adaptive
{
}

impl RoutingAlgorithm for Adaptive
{
	fn name(&self) -> &'static str
	{
		"adaptive"
	}
	fn route(&self, _context:&mut RoutingContext, _packet:&mut PacketRouteState, _destination_router:usize) -> Result<RouteDecision,Error>
	{
		Err(error!(not_implemented,"adaptive multipath routing".to_string()))
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::routing::test_support::*;
	use crate::routing::tables::WeightedRoutingTable;
	#[test]
	fn round_robin_paths_and_channels()
	{
		let mut fixture=Fixture::square(0);
		let mut taken=vec![];
		for _ in 0..3
		{
			let mut packet=PacketRouteState::new(4,0);
			let decision=fixture.route(&Nonadaptive{},&mut packet,2).expect("routable");
			assert_eq!(decision.virtual_channel,0);
			taken.push(packet.path.clone());
		}
		assert_eq!(taken,vec![vec![0,1,2],vec![0,3,2],vec![0,1,2]]);
	}
	#[test]
	fn path_integrity_is_checked()
	{
		let mut fixture=Fixture::square(1);
		let mut packet=PacketRouteState::new(4,0);
		packet.path=vec![0,1];
		packet.hops=1;
		let err=fixture.route(&Nonadaptive{},&mut packet,2).unwrap_err();
		assert!(err.is_path_integrity_error());
	}
	#[test]
	fn weighted_draw_follows_weights()
	{
		let mut weighted=WeightedRoutingTable::new();
		weighted.push(1,1.0,vec![0,1]);
		weighted.push(3,1.0,vec![0,3]);
		weighted.push(2,0.0,vec![0,1,2]);
		weighted.push(2,1.0,vec![0,3,2]);
		let mut fixture=Fixture::square(0);
		fixture.tables=fixture.tables.clone().with_weighted(weighted);
		for _ in 0..50
		{
			let mut packet=PacketRouteState::new(4,0);
			fixture.route(&NonadaptiveWeighted{},&mut packet,2).expect("routable");
			assert_eq!(packet.path,vec![0,3,2]);
		}
	}
	#[test]
	fn weighted_without_table_fails()
	{
		let mut fixture=Fixture::square(0);
		let mut packet=PacketRouteState::new(4,0);
		assert!(fixture.route(&NonadaptiveWeighted{},&mut packet,2).unwrap_err().is_configuration_error());
	}
	#[test]
	fn adaptive_is_not_implemented()
	{
		let mut fixture=Fixture::square(0);
		let mut packet=PacketRouteState::new(4,0);
		let err=fixture.route(&Adaptive{},&mut packet,2).unwrap_err();
		assert!(matches!(err.kind,crate::error::ErrorKind::NotImplemented{..}));
	}
}

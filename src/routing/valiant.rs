
use tracing::debug;

use super::{RoutingAlgorithm,RoutingContext,PacketRouteState,RouteDecision,DetourPhase,forward,advance_detour,random_other_router,check_fresh};
use crate::error::Error;

///Valiant routing: go to a random intermediate router by one of its paths and then to the destination.
///Both segments take their paths in round-robin, the first from the source table and the second from the intermediate's.
///An intermediate equal to the destination gives a single segment.
#[derive(Debug)]
pub struct Valiant
{
}

impl RoutingAlgorithm for Valiant
{
	fn name(&self) -> &'static str
	{
		"valiant"
	}
	fn route(&self, context:&mut RoutingContext, packet:&mut PacketRouteState, destination_router:usize) -> Result<RouteDecision,Error>
	{
		match packet.detour_phase
		{
			DetourPhase::NotDetouring =>
			{
				check_fresh(context,packet)?;
				let intermediate=random_other_router(context)?;
				if intermediate==destination_router
				{
					packet.path=context.tables.next_path(destination_router)?;
					packet.detour_phase=DetourPhase::ReturnLeg;
				}
				else
				{
					packet.path=context.tables.next_path(intermediate)?;
					packet.detour_phase=DetourPhase::EnRouteToIntermediate(intermediate);
				}
				debug!(router=context.router,destination_router,intermediate,path=?packet.path,"valiant detour");
			},
			DetourPhase::EnRouteToIntermediate(_) => advance_detour(context,packet,destination_router)?,
			DetourPhase::ReturnLeg => (),
		}
		forward(context,packet)
	}
	fn is_two_phase(&self) -> bool
	{
		true
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::routing::test_support::*;
	#[test]
	fn first_segment_goes_to_intermediate()
	{
		let mut fixture=Fixture::ring(8,0);
		for _ in 0..20
		{
			let mut packet=PacketRouteState::new(0,0);
			let decision=fixture.route(&Valiant{},&mut packet,4).expect("routable");
			assert_eq!(decision.virtual_channel,0);
			assert_eq!(packet.hops,1);
			assert_eq!(packet.path[0],0);
			match packet.detour_phase
			{
				DetourPhase::EnRouteToIntermediate(target) =>
				{
					assert_ne!(target,0);
					assert_ne!(target,4);
					assert_eq!(*packet.path.last().unwrap(),target);
				},
				DetourPhase::ReturnLeg => assert_eq!(*packet.path.last().unwrap(),4),
				DetourPhase::NotDetouring => panic!("no decision taken"),
			}
		}
	}
	#[test]
	fn second_segment_is_appended_at_intermediate()
	{
		//At router 2, a packet that came from 0 with intermediate 2 and goes to 5.
		let mut fixture=Fixture::ring(8,2);
		let mut packet=PacketRouteState::new(5,0);
		packet.path=vec![0,1,2];
		packet.hops=2;
		packet.detour_phase=DetourPhase::EnRouteToIntermediate(2);
		let decision=fixture.route(&Valiant{},&mut packet,5).expect("routable");
		assert_eq!(packet.path,vec![0,1,2,3,4,5]);
		assert_eq!(packet.detour_phase,DetourPhase::ReturnLeg);
		assert_eq!(packet.detour_offset,2);
		assert_eq!(decision,RouteDecision{port:0,virtual_channel:2});
	}
}

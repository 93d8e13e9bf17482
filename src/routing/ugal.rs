/*!

The UGAL family. At the first hop the packet compares the direct paths to its destination with a few random Valiant detours, costing each candidate by the queue length of its first port, and takes the cheapest. Ties are broken at random. After that decision the packet proceeds as in [Valiant](super::valiant::Valiant).

The variants only differ in the cost given to the candidates, where `q` is the queue length at the first port of the candidate and `h` its number of hops:

| variant | direct | detour through `i` |
|---|---|---|
| `ugal` | `h*q` | `(h+max_path_length)*q` |
| `ugal_precise` | `h*q` | `(h+distance(i,destination))*q+1` |
| `ugal_threshold` | `q` | `2*q+bias` |

*/

use std::collections::BTreeSet;

use ::rand::Rng;
use ::rand::seq::SliceRandom;
use tracing::debug;

use super::{RoutingAlgorithm,RoutingContext,PacketRouteState,RouteDecision,DetourPhase,forward,advance_detour,check_fresh};
use crate::error::Error;
use crate::error;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum UgalVariant
{
	///Detours are costed with the worst length of their second segment.
	Plain,
	///Detours are costed with the actual distance from the intermediate to the destination.
	Precise,
	///Detours pay twice the queue plus a fixed bias.
	Threshold,
}

///A route considered at the first hop.
#[derive(Clone,Debug)]
struct Candidate
{
	path: Vec<usize>,
	///The intermediate router of a detour. `None` for the direct paths.
	intermediate: Option<usize>,
	cost: usize,
}

#[derive(Debug)]
pub struct Ugal
{
	variant: UgalVariant,
}

impl Ugal
{
	pub fn new(variant:UgalVariant) -> Ugal
	{
		Ugal{variant}
	}
	fn cost(&self, context:&RoutingContext, path:&[usize], intermediate:Option<usize>, destination_router:usize) -> Result<usize,Error>
	{
		if path.len()<2
		{
			return Err(error!(path_integrity,context.router,0,path.to_vec()));
		}
		let port=context.tables.port_for(path[1])?;
		let q=context.congestion.queue_length(port,context.start_vc);
		let hops=path.len()-1;
		let cost=match (self.variant,intermediate)
		{
			(UgalVariant::Threshold,None) => q,
			(UgalVariant::Threshold,Some(_)) => 2*q+context.bias,
			(_,None) => hops*q,
			(UgalVariant::Plain,Some(_)) => (hops+context.max_path_length)*q,
			(UgalVariant::Precise,Some(i)) => (hops+context.tables.distance(i,destination_router)?)*q+1,
		};
		Ok(cost)
	}
	///Draw `num_val` different detour paths, each one towards a random intermediate other than the current router and the destination.
	///The pairs (intermediate, index of the path in its entry) are returned sorted.
	fn draw_detours(&self, context:&mut RoutingContext, destination_router:usize) -> Result<Vec<(usize,usize)>,Error>
	{
		let others:Vec<usize>=(0..context.num_routers).filter(|&r|r!=context.router && r!=destination_router).collect();
		let mut sizes=Vec::with_capacity(others.len());
		for &intermediate in others.iter()
		{
			sizes.push(context.tables.paths_for(intermediate)?.paths().len());
		}
		let available:usize=sizes.iter().sum();
		if available<context.num_val
		{
			return Err(error!(insufficient_detour_candidates,context.router,context.num_val,available));
		}
		let mut chosen=BTreeSet::new();
		let mut attempts=0;
		while chosen.len()<context.num_val && attempts<16*context.num_val
		{
			let k=context.rng.gen_range(0..others.len());
			let index=context.rng.gen_range(0..sizes[k]);
			chosen.insert((others[k],index));
			attempts+=1;
		}
		if chosen.len()<context.num_val
		{
			//Unlucky draws. Complete the set with a sample of the remaining detours.
			let remaining:Vec<(usize,usize)>=others.iter().zip(sizes.iter())
				.flat_map(|(&i,&size)|(0..size).map(move|index|(i,index)))
				.filter(|pair|!chosen.contains(pair))
				.collect();
			let missing=context.num_val-chosen.len();
			chosen.extend(remaining.choose_multiple(&mut *context.rng,missing).copied());
		}
		Ok(chosen.into_iter().collect())
	}
	///The candidates of a first-hop decision with their costs: the drawn detours followed by the direct paths.
	fn score(&self, context:&mut RoutingContext, destination_router:usize) -> Result<Vec<Candidate>,Error>
	{
		let mut candidates=vec![];
		for (intermediate,index) in self.draw_detours(context,destination_router)?
		{
			let path=context.tables.paths_for(intermediate)?.paths()[index].clone();
			let cost=self.cost(context,&path,Some(intermediate),destination_router)?;
			candidates.push(Candidate{path,intermediate:Some(intermediate),cost});
		}
		let direct=context.tables.paths_for(destination_router)?.paths().to_vec();
		for path in direct
		{
			let cost=self.cost(context,&path,None,destination_router)?;
			candidates.push(Candidate{path,intermediate:None,cost});
		}
		Ok(candidates)
	}
	///Take the first-hop decision, leaving the packet with its path and detour phase.
	///The candidate is drawn uniformly among those of least cost.
	fn select(&self, context:&mut RoutingContext, packet:&mut PacketRouteState, destination_router:usize) -> Result<(),Error>
	{
		let candidates=self.score(context,destination_router)?;
		let best_cost=candidates.iter().map(|c|c.cost).min().ok_or_else(||error!(missing_entry,context.router,destination_router,"routing"))?;
		let mut best:Vec<Candidate>=candidates.into_iter().filter(|c|c.cost==best_cost).collect();
		let ties=best.len();
		let chosen=best.swap_remove(context.rng.gen_range(0..ties));
		debug!(router=context.router,destination_router,variant=?self.variant,cost=best_cost,ties,path=?chosen.path,"ugal choice");
		packet.detour_phase=match chosen.intermediate
		{
			Some(intermediate) => DetourPhase::EnRouteToIntermediate(intermediate),
			None => DetourPhase::ReturnLeg,
		};
		packet.path=chosen.path;
		Ok(())
	}
}

impl RoutingAlgorithm for Ugal
{
	fn name(&self) -> &'static str
	{
		match self.variant
		{
			UgalVariant::Plain => "ugal",
			UgalVariant::Precise => "ugal_precise",
			UgalVariant::Threshold => "ugal_threshold",
		}
	}
	fn route(&self, context:&mut RoutingContext, packet:&mut PacketRouteState, destination_router:usize) -> Result<RouteDecision,Error>
	{
		match packet.detour_phase
		{
			DetourPhase::NotDetouring =>
			{
				check_fresh(context,packet)?;
				self.select(context,packet,destination_router)?;
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
	fn requires_distance_table(&self) -> bool
	{
		self.variant==UgalVariant::Precise
	}
	fn detour_candidates(&self) -> bool
	{
		true
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::routing::test_support::*;
	use crate::routing::tables::DistanceTable;
	use crate::matrix::Matrix;
	use std::rc::Rc;

	fn ring_distances(n:usize) -> DistanceTable
	{
		let mut matrix=Matrix::constant(0,n,n);
		for i in 0..n
		{
			for j in 0..n
			{
				let forward=(j+n-i)%n;
				*matrix.get_mut(i,j)=forward.min(n-forward);
			}
		}
		DistanceTable::new(matrix)
	}

	#[test]
	fn idle_network_goes_direct()
	{
		//Without congestion direct paths cost 0 in ugal, as do detours; but in ugal_precise detours cost at least 1.
		let mut fixture=Fixture::ring(6,0);
		fixture.tables=fixture.tables.clone().with_distance(Rc::new(ring_distances(6)));
		for _ in 0..20
		{
			let mut packet=PacketRouteState::new(3,0);
			fixture.route(&Ugal::new(UgalVariant::Precise),&mut packet,3).expect("routable");
			assert_eq!(packet.detour_phase,DetourPhase::ReturnLeg);
			assert_eq!(*packet.path.last().unwrap(),3);
		}
	}
	#[test]
	fn congested_direct_port_forces_detour()
	{
		//Router 0 of a ring of 6 sending to 1. Its only direct path leaves by port 0.
		let mut fixture=Fixture::ring(6,0);
		//Take every detour as candidate.
		fixture.num_val=5;
		fixture.congestion.set(0,0,100).expect("within range");
		for _ in 0..20
		{
			let mut packet=PacketRouteState::new(1,0);
			let decision=fixture.route(&Ugal::new(UgalVariant::Threshold),&mut packet,1).expect("routable");
			//Detours by port 1 cost 2*0+50 while the direct path costs 100.
			assert_eq!(decision.port,1);
			assert!(matches!(packet.detour_phase,DetourPhase::EnRouteToIntermediate(_)));
		}
	}
	#[test]
	fn threshold_prefers_direct_below_bias()
	{
		let mut fixture=Fixture::ring(6,0);
		fixture.congestion.set(0,0,10).expect("within range");
		fixture.congestion.set(1,0,10).expect("within range");
		let mut packet=PacketRouteState::new(1,0);
		fixture.route(&Ugal::new(UgalVariant::Threshold),&mut packet,1).expect("routable");
		assert_eq!(packet.path,vec![0,1]);
		assert_eq!(packet.detour_phase,DetourPhase::ReturnLeg);
	}
	#[test]
	fn ties_are_drawn_uniformly()
	{
		//Router 0 of a ring of 4 sending to 2. Idle, both direct paths cost 0 and the detours through 1 and 3 cost 1.
		let mut fixture=Fixture::square(0);
		fixture.tables=fixture.tables.clone().with_distance(Rc::new(ring_distances(4)));
		let ugal=Ugal::new(UgalVariant::Precise);
		let mut counts=vec![0;2];
		for _ in 0..200
		{
			let mut packet=PacketRouteState::new(2,0);
			fixture.route(&ugal,&mut packet,2).expect("routable");
			assert_eq!(packet.detour_phase,DetourPhase::ReturnLeg);
			match packet.path.as_slice()
			{
				[0,1,2] => counts[0]+=1,
				[0,3,2] => counts[1]+=1,
				path => panic!("took {:?}, which is not of least cost",path),
			}
		}
		assert!(counts.iter().all(|&c|c>=60),"unbalanced ties {:?}",counts);
	}
	#[test]
	fn choice_has_the_least_cost()
	{
		let mut fixture=Fixture::ring(6,0);
		fixture.tables=fixture.tables.clone().with_distance(Rc::new(ring_distances(6)));
		fixture.num_val=4;
		for variant in [UgalVariant::Plain,UgalVariant::Precise,UgalVariant::Threshold].iter()
		{
			let ugal=Ugal::new(*variant);
			for step in 0..30
			{
				fixture.congestion.set(0,0,(step*7)%13).expect("within range");
				fixture.congestion.set(1,0,(step*5)%11).expect("within range");
				//The same generator state draws the same detours in both calls.
				let mut twin=fixture.rng.clone();
				let scored={
					let mut context=fixture.context();
					context.rng=&mut twin;
					ugal.score(&mut context,3).expect("enough detours")
				};
				let mut packet=PacketRouteState::new(3,0);
				ugal.select(&mut fixture.context(),&mut packet,3).expect("routable");
				let chosen=scored.iter().find(|c|c.path==packet.path).expect("the choice is a scored candidate");
				assert!(scored.iter().all(|c|chosen.cost<=c.cost),"{:?} chose cost {} among {:?}",variant,chosen.cost,scored);
			}
		}
	}
	#[test]
	fn too_few_detours()
	{
		//In a ring of 3 the only intermediate for 0->1 is 2, with a single path.
		let mut fixture=Fixture::ring(3,0);
		fixture.num_val=2;
		let mut packet=PacketRouteState::new(1,0);
		let err=fixture.route(&Ugal::new(UgalVariant::Plain),&mut packet,1).unwrap_err();
		assert!(err.is_configuration_error());
	}
	#[test]
	fn detour_draws_are_distinct()
	{
		//Routers 2, 3 and 4 are the intermediates for 0->1, with one path each.
		let mut fixture=Fixture::ring(5,0);
		let ugal=Ugal::new(UgalVariant::Plain);
		let mut context=RoutingContext{
			router: 0,
			num_routers: 5,
			tables: &mut fixture.tables,
			rng: &mut fixture.rng,
			congestion: &fixture.congestion,
			start_vc: 0,
			num_vcs: 4,
			bias: 50,
			max_path_length: 2,
			num_val: 3,
		};
		let draws=ugal.draw_detours(&mut context,1).expect("enough detours");
		assert_eq!(draws,vec![(2,0),(3,0),(4,0)]);
	}
}

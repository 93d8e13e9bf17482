mod common;

use caminos_multipath::routing::DetourPhase;
use common::*;

#[test]
fn detours_are_walks_of_the_graph()
{
	let n=8;
	let mut network=ring_network(n,"algorithm:\"valiant\"");
	let congestion=idle(n);
	for source in 0..n
	{
		for destination in 0..n
		{
			if source==destination
			{
				continue;
			}
			let delivery=network.deliver(source,destination,0,&congestion).expect("delivered");
			let hops=delivery.route.hops;
			assert!(hops>=1 && hops<=2*(n/2),"{} hops from {} to {}",hops,source,destination);
			//One virtual channel per hop, in increasing order.
			assert_eq!(delivery.virtual_channels(),(0..hops).collect::<Vec<_>>());
			let routers=delivery.routers();
			assert_eq!(&routers[..],&delivery.route.path[..=hops]);
			assert_eq!(routers[0],source);
			assert_eq!(*routers.last().expect("some router"),destination);
			assert!(is_ring_walk(n,&routers));
		}
	}
}

#[test]
fn second_segment_starts_at_the_intermediate()
{
	let n=8;
	let mut network=ring_network(n,"algorithm:\"valiant\"");
	let congestion=idle(n);
	let mut detoured=0;
	for _ in 0..40
	{
		let delivery=network.deliver(0,4,0,&congestion).expect("delivered");
		let route=&delivery.route;
		if route.detour_phase==DetourPhase::ReturnLeg && route.detour_offset>0
		{
			detoured+=1;
			let intermediate=route.path[route.detour_offset];
			assert_ne!(intermediate,0);
			assert_ne!(intermediate,4);
			//Each segment is a shortest path of the ring.
			let first=route.detour_offset;
			let second=route.path.len()-1-route.detour_offset;
			assert!(first<=n/2 && second<=n/2);
			assert_eq!(route.path.len()-1,route.hops);
		}
	}
	assert!(detoured>0);
}

#[test]
fn two_virtual_networks_use_disjoint_channels()
{
	let n=6;
	let mut network=ring_network(n,"algorithm:[\"nonadaptive\",\"valiant\"]");
	assert_eq!(network.router(0).expect("router").vcs_per_vn(),vec![3,6]);
	let congestion=idle(n);
	let delivery=network.deliver(0,3,1,&congestion).expect("delivered");
	assert!(delivery.virtual_channels().iter().all(|&vc|vc>=3 && vc<9));
	let delivery=network.deliver(0,3,0,&congestion).expect("delivered");
	assert_eq!(delivery.virtual_channels(),vec![0,1,2]);
}

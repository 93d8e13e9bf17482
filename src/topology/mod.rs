/*!

The graph of routers described by the connectivity records. The routing algorithms never walk it, since they follow the precomputed paths; it is used to derive the distance table needed by the precise cost variants and to check that the tables are consistent with the wiring.

*/

pub mod graph;

use quantifiable_derive::Quantifiable;//the derive macro
use crate::matrix::Matrix;
use crate::quantify::Quantifiable;

///What is at the other side of a router port.
#[derive(Clone,Debug,PartialEq,Eq,Quantifiable)]
pub enum Location
{
	RouterPort{
		router_index: usize,
	},
	///A port without a connectivity record.
	None,
}

///A topology describes how routers are connected among them.
///The first `degree(index)` ports of the router `index` go to other routers. The endpoint ports are not part of the graph.
pub trait Topology : Quantifiable + std::fmt::Debug
{
	fn num_routers(&self) -> usize;
	///What is connected to a port of a router.
	fn neighbour(&self, router_index:usize, port:usize) -> Location;
	///Number of ports used to other routers.
	fn degree(&self, router_index: usize) -> usize;

	///Breadth First Search to compute distances from a router to all others.
	///Unreachable routers get `usize::MAX`.
	fn bfs(&self, origin:usize) -> Vec<usize>
	{
		let n=self.num_routers();
		#[allow(non_snake_case)]
		let mut R=vec![<usize>::max_value();n];
		R[origin]=0;
		let mut queue=vec![0;n];
		let mut queue_read_index=0;//Next to read
		let mut queue_write_index=1;//Next to write
		queue[0]=origin;
		while queue_read_index<queue_write_index
		{
			let best=queue[queue_read_index];
			queue_read_index+=1;
			for port in 0..self.degree(best)
			{
				if let Location::RouterPort{router_index,..} = self.neighbour(best,port)
				{
					if R[router_index]==<usize>::max_value()
					{
						R[router_index]=R[best]+1;
						queue[queue_write_index]=router_index;
						queue_write_index+=1;
					}
				}
			}
		}
		R
	}

	///All-pairs distances by a BFS from each router.
	fn compute_distance_matrix(&self) -> Matrix<usize>
	{
		let n=self.num_routers();
		let mut matrix=Matrix::constant(0,n,n);
		for i in 0..n
		{
			let d=self.bfs(i);
			for j in 0..n
			{
				*matrix.get_mut(i,j)=d[j];
			}
		}
		matrix
	}
}

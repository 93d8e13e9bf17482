/*!

Memory accounting of the structures kept by the routers. The precomputed path tables dominate the memory of a large simulation, so the embedding simulator may ask each router for its footprint.

The derive macro `#[derive(Quantifiable)]` from `quantifiable-derive` builds an implementation summing the implementations of the fields.

*/

use std::mem::size_of;
use std::collections::{BTreeMap,BTreeSet};
use std::rc::Rc;

pub trait Quantifiable
{
	/// Get the total memory currently being employed by the implementing type. Both stack and heap.
	fn total_memory(&self) -> usize;
	/// Prints by stdout how much memory is used per component.
	fn print_memory_breakdown(&self)
	{
		println!("total: {}",human_bytes(self.total_memory()));
	}
	/// Get an estimation on how much memory the type could reach during the simulation.
	/// Tables do not grow after being loaded, so by default this is the current amount.
	fn forecast_total_memory(&self) -> usize
	{
		self.total_memory()
	}
}

impl<T:Quantifiable> Quantifiable for Vec<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Vec<T>>() + self.iter().map(|e|e.total_memory()).sum::<usize>() + (self.capacity()-self.len())*size_of::<T>()
	}
}

impl<A:Quantifiable, B:Quantifiable> Quantifiable for (A,B)
{
	fn total_memory(&self) -> usize
	{
		self.0.total_memory()+self.1.total_memory()
	}
}

impl<K:Quantifiable, V:Quantifiable> Quantifiable for BTreeMap<K,V>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Self>() + self.iter().map(|(k,v)|k.total_memory()+v.total_memory()).sum::<usize>()
	}
}

impl<K:Quantifiable> Quantifiable for BTreeSet<K>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Self>() + self.iter().map(|k|k.total_memory()).sum::<usize>()
	}
}

impl<T:Quantifiable> Quantifiable for Option<T>
{
	fn total_memory(&self) -> usize
	{
		match self
		{
			&None => size_of::<Option<T>>(),
			&Some(ref thing) => size_of::<Option<T>>() - size_of::<T>() + thing.total_memory(),
		}
	}
}

impl<T:Quantifiable+?Sized> Quantifiable for Box<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Box<T>>() + T::total_memory(self)
	}
}

///Only the pointer is counted. The pointee is accounted by whoever builds it.
impl<T:?Sized> Quantifiable for Rc<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Rc<T>>()
	}
}

macro_rules! quantifiable_simple
{
	($t:ty) =>
	{
		impl Quantifiable for $t
		{
			fn total_memory(&self) -> usize
			{
				size_of::<$t>()
			}
		}
	}
}

quantifiable_simple!(bool);
quantifiable_simple!(usize);
quantifiable_simple!(f32);
quantifiable_simple!(f64);

///Format an amount of bytes with a unit that keeps the figure readable.
pub fn human_bytes(byte_amount:usize) -> String
{
	if byte_amount<3000
	{
		return format!("{} bytes",byte_amount);
	}
	let kb_amount=byte_amount as f64 / 1024.;
	if kb_amount<3000f64
	{
		return format!("{:.1} KB",kb_amount);
	}
	let mb_amount=kb_amount / 1024.;
	if mb_amount<3000f64
	{
		return format!("{:.1} MB",mb_amount);
	}
	let gb_amount=mb_amount / 1024.;
	format!("{:.1} GB",gb_amount)
}

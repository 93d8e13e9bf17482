
use std::mem::size_of;
use crate::quantify::Quantifiable;

///A dense row-major matrix. Used for the distance table between routers.
#[derive(Debug,Clone)]
pub struct Matrix<T>
{
	data: Vec<T>,
	num_rows: usize,
	num_columns: usize,
}

impl<T> Matrix<T>
{
	///Read a matrix entry.
	pub fn get(&self,row:usize,column:usize) -> &T
	{
		&self.data[row*self.num_columns+column]
	}
	///Read an entry, or `None` if the position is outside the matrix.
	pub fn try_get(&self,row:usize,column:usize) -> Option<&T>
	{
		if row<self.num_rows && column<self.num_columns
		{
			Some(&self.data[row*self.num_columns+column])
		}
		else
		{
			None
		}
	}
	///Read/write a matrix entry.
	pub fn get_mut(&mut self,row:usize,column:usize) -> &mut T
	{
		&mut self.data[row*self.num_columns+column]
	}
	///The entries of a whole row.
	pub fn row(&self,row:usize) -> &[T]
	{
		&self.data[row*self.num_columns..(row+1)*self.num_columns]
	}
	pub fn get_rows(&self) -> usize
	{
		self.num_rows
	}
	pub fn get_columns(&self) -> usize
	{
		self.num_columns
	}
	///Build a matrix with constant values.
	pub fn constant(value:T,num_rows:usize,num_columns:usize) -> Matrix<T> where T:Clone
	{
		Matrix{
			data: vec![value;num_rows*num_columns],
			num_rows,
			num_columns,
		}
	}
}

impl<T:Quantifiable> Quantifiable for Matrix<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Matrix<T>>() + self.data.total_memory()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn rows_are_contiguous()
	{
		let mut m=Matrix::constant(0usize,2,3);
		*m.get_mut(1,2)=5;
		*m.get_mut(0,1)=7;
		assert_eq!(m.row(0),&[0,7,0]);
		assert_eq!(m.row(1),&[0,0,5]);
		assert_eq!(m.try_get(2,0),None);
		assert_eq!(m.try_get(1,2),Some(&5));
		assert_eq!((m.get_rows(),m.get_columns()),(2,3));
	}
}

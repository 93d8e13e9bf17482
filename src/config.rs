/*!

Helpers to read the `ConfigurationValue` trees produced by the [config_parser](crate::config_parser).

* [match_object!](crate::match_object) to iterate the members of an object, rejecting unknown fields.
* Accessors such as `as_usize` returning errors instead of panicking.
* [parse_configuration] and [parse_configuration_file] to get a value from source text.

*/

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::config_parser::{self,ConfigurationValue,Token};
use crate::error::Error;
use crate::error;

///Iterates the members of a `ConfigurationValue::Object`, applying the given arms to the member names.
///The member `legend_name` is always accepted and ignored.
///Any other member not in the arms produces an `IllFormedConfiguration` error returned from the enclosing function.
///```ignore
///match_object!(cv,"FromGraph",value,
///	"num_routers" => num_routers=Some(value.as_usize()?),
///);
///```
#[macro_export]
macro_rules! match_object{
	($cv:expr, $name:literal, $valueid:ident, $($arm:tt)* ) => {{
		$crate::match_object!($cv,[$name],$valueid,$($arm)*)
	}};
	($cv:expr, $names:expr, $valueid:ident, $($arm:tt)* ) => {{
		if let &$crate::config_parser::ConfigurationValue::Object(ref cv_name, ref cv_pairs) = $cv
		{
			if !$names.iter().any(|&x|x==cv_name)
			{
				return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Expected one of `{:?}` objects, not `{}`",$names,cv_name)));
			}
			for &(ref name,ref $valueid) in cv_pairs
			{
				match AsRef::<str>::as_ref(&name)
				{
					$( $arm )*
					"legend_name" => (),
					_ => return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Nothing to do with field {} in {}",name,$names[0]))),
				}
			}
		}
		else
		{
			return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Trying to create a {} from a non-Object",$names[0])));
		}
	}};
}

impl ConfigurationValue
{
	pub fn as_bool(&self) -> Result<bool,Error>
	{
		match self
		{
			&ConfigurationValue::True => Ok(true),
			&ConfigurationValue::False => Ok(false),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_str(&self) -> Result<&str,Error>
	{
		match self
		{
			&ConfigurationValue::Literal(ref s) => Ok(s),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_f64(&self) -> Result<f64,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) => Ok(x),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	///Get a non-negative integer. Numbers with fractional part or beyond `usize::MAX` are rejected.
	pub fn as_usize(&self) -> Result<usize,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>
			{
				if x<0.0 || x.fract()!=0.0
				{
					Err(error!(ill_formed_configuration, self.clone()).with_message(format!("{} is not a valid non-negative integer",x)))
				}
				else if x>=usize::MAX as f64
				{
					//On 64 bits `usize::MAX as f64` rounds up to 2^64.
					Err(error!(ill_formed_configuration, self.clone()).with_message(format!("{} does not fit in an usize",x)))
				}
				else
				{
					Ok(x as usize)
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_array(&self) -> Result<&Vec<ConfigurationValue>,Error>
	{
		match self
		{
			&ConfigurationValue::Array(ref list) => Ok(list),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
}

///Parse a configuration source text into its value.
pub fn parse_configuration(source:&str) -> Result<ConfigurationValue,Error>
{
	match config_parser::parse(source)
	{
		Ok(Token::Value(value)) => Ok(value),
		Ok(token) => Err(error!(undetermined).with_message(format!("the configuration did not evaluate to a value but to {:?}",token))),
		Err(parsing_error) => Err(error!(bad_argument).with_message(format!("error parsing the configuration: {:?}",parsing_error))),
	}
}

///Read and parse a configuration file.
pub fn parse_configuration_file(path:&Path) -> Result<ConfigurationValue,Error>
{
	let mut f = File::open(path).map_err(|err|error!(could_not_open_file,path.to_path_buf(),err).with_message("could not open configuration file.".to_string()))?;
	let mut contents = String::new();
	f.read_to_string(&mut contents).map_err(|err|error!(could_not_open_file,path.to_path_buf(),err).with_message("could not read configuration file.".to_string()))?;
	parse_configuration(&contents).map_err(|_|error!(could_not_parse_file,path.to_path_buf()))
}

///Read a per-virtual-network parameter: either a single value to be used in every virtual network or an array with one value per virtual network.
///Returns `None` when `value` is `None`, so the caller can apply its default.
pub fn per_virtual_network<T,F>(value:Option<&ConfigurationValue>, num_vns:usize, read:F) -> Result<Option<Vec<T>>,Error>
	where T:Clone, F:Fn(&ConfigurationValue)->Result<T,Error>
{
	match value
	{
		None => Ok(None),
		Some(&ConfigurationValue::Array(ref list)) =>
		{
			if list.len()!=num_vns
			{
				return Err(error!(bad_argument).with_message(format!("array length must match the number of virtual networks ({} expected, {} found)",num_vns,list.len())));
			}
			list.iter().map(|v|read(v)).collect::<Result<Vec<T>,Error>>().map(Some)
		},
		Some(single) =>
		{
			let x=read(single)?;
			Ok(Some(vec![x;num_vns]))
		},
	}
}

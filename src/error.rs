/*!

This module is for managing errors in the code of caminos-multipath. Every inconsistency between the precomputed tables and the live router is reported through this type instead of invoking `panic!`, so the embedding simulator can abort the run with a meaningful message.

Instead of `expect` or `unwrap_or_else` try
* `map_err` like in `.map_err(|e|error!(could_not_open_file,path.to_path_buf(),e))?;`
* `ok_or_else` like in `.ok_or_else( ||error!(missing_entry,router,destination,"routing") )?;`

Instead of `panic!` try
* Return an error. E.g., by `return Err( error!(not_implemented,"adaptive routing".to_string()) );`

The kinds are grouped into the two classes the routers care about:
* configuration errors, detected while building the router. See [Error::is_configuration_error].
* path integrity errors, detected while routing a packet. See [Error::is_path_integrity_error].

*/

use std::fmt::{Display,Formatter};
use std::path::PathBuf;

use crate::config_parser::ConfigurationValue;

/// The main Error class to be used in each `Result(Whatever,Error)`.
/// It contains the code source of the error and its kind.
/// An arbitrary `String` message can be optionally attached.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

/// A source code location where an error occurred.
/// Contains the values of the macros `std::{file,line,column}`.
#[derive(Debug)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

#[derive(Debug)]
pub enum ErrorKind
{
	/// A configuration value that does not have the expected shape.
	IllFormedConfiguration{
		value: ConfigurationValue,
	},
	/// Some argument has an unacceptable value.
	BadArgument,
	/// The name given for a routing algorithm does not match any of them.
	UnknownAlgorithm{
		name: String,
	},
	/// The router has not enough ports for the router-to-router links plus the endpoints.
	PortCountMismatch{
		required: usize,
		available: usize,
	},
	/// A whole table required by the configured algorithms has not been provided.
	/// `router` is `None` for the tables shared by the whole network.
	MissingTable{
		router: Option<usize>,
		table: &'static str,
	},
	/// A table lacks the entry for some destination.
	MissingEntry{
		router: usize,
		destination: usize,
		table: &'static str,
	},
	/// The hop counter of a packet went beyond the path it carries.
	PathIntegrity{
		router: usize,
		hops: usize,
		path: Vec<usize>,
	},
	/// The packet would need a virtual channel outside the range of its virtual network.
	VirtualChannelExhausted{
		router: usize,
		virtual_channel: usize,
		start: usize,
		size: usize,
	},
	/// There are not enough different detour paths to build the UGAL candidate set.
	InsufficientDetourCandidates{
		router: usize,
		requested: usize,
		available: usize,
	},
	/// A configured feature whose semantics have never been built.
	NotImplemented{
		feature: String,
	},
	CouldNotOpenFile{
		filepath: PathBuf,
		error:std::io::Error,
	},
	CouldNotParseFile{
		filepath: PathBuf,
	},
	/// A single record of a table could not be parsed.
	CouldNotParseRecord{
		line: usize,
		text: String,
	},
	/// Any other error. Better to add new types than to use this thing.
	Undetermined,
}

// source_location!()
#[macro_export]
macro_rules! source_location{
	() => {
		$crate::error::SourceLocation{
			file: file!(),
			line: line!(),
			column: column!(),
		}
	}
}

/// Build an `Error` of the given kind at the current source location.
/// `error!(missing_entry,router,destination,"routing")` expands to `Error::missing_entry(source_location!(),router,destination,"routing")`.
#[macro_export]
macro_rules! error{
	($kind:ident) => {{
		$crate::error::Error::$kind( $crate::source_location!() )
	}};
	($kind:ident, $($args:expr),* ) => {{
		$crate::error::Error::$kind( $crate::source_location!(), $($args),* )
	}};
}

use ErrorKind::*;

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message:None,
		}
	}
	pub fn with_message(mut self,message:String) -> Error
	{
		self.message=Some(message);
		self
	}
	pub fn ill_formed_configuration(source_location:SourceLocation,value:ConfigurationValue)->Error
	{
		Error::new(source_location,IllFormedConfiguration{value})
	}
	pub fn bad_argument(source_location:SourceLocation)->Error
	{
		Error::new(source_location,BadArgument)
	}
	pub fn unknown_algorithm(source_location:SourceLocation,name:String)->Error
	{
		Error::new(source_location,UnknownAlgorithm{name})
	}
	pub fn port_count_mismatch(source_location:SourceLocation,required:usize,available:usize)->Error
	{
		Error::new(source_location,PortCountMismatch{required,available})
	}
	pub fn missing_table(source_location:SourceLocation,router:Option<usize>,table:&'static str)->Error
	{
		Error::new(source_location,MissingTable{router,table})
	}
	/// example call: error!(missing_entry,router,destination,"connectivity").
	pub fn missing_entry(source_location:SourceLocation,router:usize,destination:usize,table:&'static str)->Error
	{
		Error::new(source_location,MissingEntry{router,destination,table})
	}
	pub fn path_integrity(source_location:SourceLocation,router:usize,hops:usize,path:Vec<usize>)->Error
	{
		Error::new(source_location,PathIntegrity{router,hops,path})
	}
	pub fn virtual_channel_exhausted(source_location:SourceLocation,router:usize,virtual_channel:usize,start:usize,size:usize)->Error
	{
		Error::new(source_location,VirtualChannelExhausted{router,virtual_channel,start,size})
	}
	pub fn insufficient_detour_candidates(source_location:SourceLocation,router:usize,requested:usize,available:usize)->Error
	{
		Error::new(source_location,InsufficientDetourCandidates{router,requested,available})
	}
	pub fn not_implemented(source_location:SourceLocation,feature:String)->Error
	{
		Error::new(source_location,NotImplemented{feature})
	}
	pub fn could_not_open_file(source_location:SourceLocation,filepath:PathBuf,error:std::io::Error)->Error
	{
		Error::new(source_location,CouldNotOpenFile{filepath,error})
	}
	pub fn could_not_parse_file(source_location:SourceLocation,filepath:PathBuf)->Error
	{
		Error::new(source_location,CouldNotParseFile{filepath})
	}
	pub fn could_not_parse_record(source_location:SourceLocation,line:usize,text:String)->Error
	{
		Error::new(source_location,CouldNotParseRecord{line,text})
	}
	pub fn undetermined(source_location:SourceLocation)->Error
	{
		Error::new(source_location,Undetermined)
	}
	/// Whether the error comes from a defective configuration or table set, to be detected when building routers.
	pub fn is_configuration_error(&self) -> bool
	{
		match self.kind
		{
			IllFormedConfiguration{..} | BadArgument | UnknownAlgorithm{..} | PortCountMismatch{..} | MissingTable{..}
				| InsufficientDetourCandidates{..} | CouldNotOpenFile{..} | CouldNotParseFile{..} | CouldNotParseRecord{..} => true,
			_ => false,
		}
	}
	/// Whether the error was detected while routing a packet and reveals tables inconsistent with the live topology.
	pub fn is_path_integrity_error(&self) -> bool
	{
		match self.kind
		{
			PathIntegrity{..} | VirtualChannelExhausted{..} | MissingEntry{..} => true,
			_ => false,
		}
	}
}


impl Display for Error
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::result::Result<(), std::fmt::Error>
	{
		let Error{source_location:location,kind,message} = self;
		writeln!(formatter,"Error at file {} at line {} column {}.",location.file,location.line,location.column)?;
		if let Some(text) = message
		{
			writeln!(formatter,"{}",text)?;
		}
		kind.fmt(formatter)?;
		Ok(())
	}
}

impl Display for ErrorKind
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::result::Result<(), std::fmt::Error>
	{
		match self
		{
			IllFormedConfiguration{value} =>
			{
				writeln!(formatter,"IllFormedConfiguration error: the following value could not be understood:\n{}",value)?;
			},
			BadArgument =>
			{
				writeln!(formatter,"BadArgument error: some argument has an unacceptable value.")?;
			},
			UnknownAlgorithm{name} =>
			{
				writeln!(formatter,"UnknownAlgorithm error: there is no routing algorithm named {}.",name)?;
			},
			PortCountMismatch{required,available} =>
			{
				writeln!(formatter,"PortCountMismatch error: the router requires at least {} ports but it has {}.",required,available)?;
			},
			MissingTable{router:Some(router),table} =>
			{
				writeln!(formatter,"MissingTable error: router {} has no {} table.",router,table)?;
			},
			MissingTable{router:None,table} =>
			{
				writeln!(formatter,"MissingTable error: the network has no {} table.",table)?;
			},
			MissingEntry{router,destination,table} =>
			{
				writeln!(formatter,"MissingEntry error: the {} table of router {} has no entry for {}.",table,router,destination)?;
			},
			PathIntegrity{router,hops,path} =>
			{
				writeln!(formatter,"PathIntegrity error: at router {} a packet with {} hops cannot advance along the path {:?}.",router,hops,path)?;
			},
			VirtualChannelExhausted{router,virtual_channel,start,size} =>
			{
				writeln!(formatter,"VirtualChannelExhausted error: at router {} a packet requires virtual channel {}, but its virtual network has the range [{},{}).",router,virtual_channel,start,start+size)?;
			},
			InsufficientDetourCandidates{router,requested,available} =>
			{
				writeln!(formatter,"InsufficientDetourCandidates error: router {} requested {} distinct detour paths but only {} exist.",router,requested,available)?;
			},
			NotImplemented{feature} =>
			{
				writeln!(formatter,"NotImplemented error: {} is not yet implemented.",feature)?;
			},
			CouldNotOpenFile{filepath,error} =>
			{
				writeln!(formatter,"CouldNotOpenFile error: The file {:?} could not be opened.\nio_error: {}",filepath,error)?;
			},
			CouldNotParseFile{filepath} =>
			{
				writeln!(formatter,"CouldNotParseFile error: The file {:?} could not be parsed.",filepath)?;
			},
			CouldNotParseRecord{line,text} =>
			{
				writeln!(formatter,"CouldNotParseRecord error: The record at line {} could not be parsed: {}",line,text)?;
			},
			Undetermined =>
			{
				writeln!(formatter,"Undetermined error: A generic error. The concrete error should be more specified.")?;
			},
		}
		Ok(())
	}
}

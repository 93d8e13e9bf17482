/*!

Reading the per-router tables from the files produced by the offline path generator.

All the files are comma separated with a header line. Each row begins with the router owning it, and the rows of a router are contiguous, so a router reads only its own block.

* `CON.csv`: `source,dest,port`. The `port` of `source` is wired to router `dest`.
* `RT.csv`: `source,dest,path`, with `path` the space separated routers from `source` to `dest`. A destination may appear in several rows, one per path.
* `WRT.csv`: `source,dest,weight,path`, for the weighted routing.

The connectivity of a router can also be written inline as `"dest, port, port; dest, port"`, listing the ports towards each neighbour.

*/

use std::fs::File;
use std::io::{BufRead,BufReader};
use std::path::{Path,PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use tracing::info;

use crate::routing::tables::{RoutingTable,WeightedRoutingTable,ConnectivityMap,DistanceTable,RouterTables};
use crate::topology::graph::GraphTopology;
use crate::error::Error;
use crate::error;

pub const CONNECTIVITY_FILE: &str = "CON.csv";
pub const ROUTING_FILE: &str = "RT.csv";
pub const WEIGHTED_ROUTING_FILE: &str = "WRT.csv";

///Where the tables of the routers are and the shape of the network they describe.
#[derive(Clone,Debug)]
pub struct TableSource
{
	///Directory with the table files.
	pub csv_files_path: Option<PathBuf>,
	///Connectivity given in the configuration instead of `CON.csv`.
	pub inline_connectivity: Option<String>,
	pub num_routers: usize,
	///Number of router-to-router ports of each router.
	pub graph_degree: usize,
	pub max_path_length: usize,
}

///The optional tables that must be loaded.
#[derive(Clone,Copy,Debug,Default,PartialEq,Eq)]
pub struct TableRequirements
{
	pub weighted: bool,
	pub distance: bool,
}

impl TableSource
{
	fn open(&self, router:Option<usize>, name:&'static str, file:&str) -> Result<BufReader<File>,Error>
	{
		let directory=self.csv_files_path.as_ref().ok_or_else(||error!(missing_table,router,name).with_message(format!("no csv_files_path to read {} from",file)))?;
		let path=directory.join(file);
		let handle=File::open(&path).map_err(|e|error!(could_not_open_file,path.clone(),e))?;
		Ok(BufReader::new(handle))
	}
	///The connectivity of a router, inline or from its block of `CON.csv`.
	pub fn connectivity(&self, router:usize) -> Result<ConnectivityMap,Error>
	{
		let map=match self.inline_connectivity
		{
			Some(ref text) => parse_inline_connectivity(text)?,
			None =>
			{
				let records=read_connectivity(self.open(Some(router),"connectivity",CONNECTIVITY_FILE)?,Some(router))?;
				records.into_iter().map(|(_source,destination,port)|(destination,port)).collect()
			},
		};
		for (neighbour,ports) in map.iter()
		{
			if let Some(&port)=ports.iter().find(|&&p|p>=self.graph_degree)
			{
				return Err(error!(port_count_mismatch,port+1,self.graph_degree).with_message(format!("router {} reaches router {} by port {}, beyond its {} router ports",router,neighbour,port,self.graph_degree)));
			}
		}
		Ok(map)
	}
	pub fn routing_table(&self, router:usize) -> Result<RoutingTable,Error>
	{
		read_routing(self.open(Some(router),"routing",ROUTING_FILE)?,router)
	}
	pub fn weighted_routing_table(&self, router:usize) -> Result<WeightedRoutingTable,Error>
	{
		read_weighted_routing(self.open(Some(router),"weighted routing",WEIGHTED_ROUTING_FILE)?,router)
	}
	///The distances between all routers, by a BFS on the graph of all the `CON.csv` records.
	///This table belongs to the whole network, so a failure names no router.
	pub fn distance_table(&self) -> Result<DistanceTable,Error>
	{
		let records=read_connectivity(self.open(None,"distance",CONNECTIVITY_FILE)?,None)?;
		let topology=GraphTopology::from_records(self.num_routers,self.graph_degree,&records)?;
		Ok(DistanceTable::new(topology.distance_matrix().clone()))
	}
}

///Load and validate the tables of a router.
///A `shared_distance` table is used when given; otherwise it is computed if required.
pub fn load_router_tables(router:usize, source:&TableSource, requirements:TableRequirements, shared_distance:Option<Rc<DistanceTable>>) -> Result<RouterTables,Error>
{
	let connectivity=source.connectivity(router)?;
	let routing=source.routing_table(router)?;
	let mut tables=RouterTables::new(router,routing,connectivity);
	if requirements.weighted
	{
		tables=tables.with_weighted(source.weighted_routing_table(router)?);
	}
	if requirements.distance
	{
		let distance=match shared_distance
		{
			Some(distance) => distance,
			None => Rc::new(source.distance_table()?),
		};
		tables=tables.with_distance(distance);
	}
	tables.validate(source.num_routers,source.max_path_length)?;
	info!(router,destinations=tables.routing().len(),neighbours=tables.connectivity().len(),weighted=requirements.weighted,distance=requirements.distance,"router tables loaded");
	Ok(tables)
}

///Read the table files of a directory.
pub fn table_source_from_directory(path:&Path, num_routers:usize, graph_degree:usize, max_path_length:usize) -> TableSource
{
	TableSource{
		csv_files_path: Some(path.to_path_buf()),
		inline_connectivity: None,
		num_routers,
		graph_degree,
		max_path_length,
	}
}

///Call `f` with the line number and fields of each record. With `Some(router)` only the block of that router is visited.
fn for_each_record<R,F>(reader:R, router:Option<usize>, mut f:F) -> Result<(),Error>
	where R:BufRead, F:FnMut(usize,&[&str])->Result<(),Error>
{
	let mut in_block=false;
	for (index,rline) in reader.lines().enumerate()
	{
		let line_number=index+1;
		let line=rline.map_err(|e|error!(could_not_parse_record,line_number,e.to_string()))?;
		if index==0
		{
			//header
			continue;
		}
		let text=line.trim();
		if text.is_empty()
		{
			continue;
		}
		let fields:Vec<&str>=text.split(',').map(|field|field.trim()).collect();
		let source:usize=parse_field(fields[0],line_number,text)?;
		if let Some(router)=router
		{
			if source!=router
			{
				if in_block
				{
					break;
				}
				continue;
			}
			in_block=true;
		}
		f(line_number,&fields)?;
	}
	Ok(())
}

fn parse_field<T:FromStr>(field:&str, line_number:usize, text:&str) -> Result<T,Error>
{
	field.parse::<T>().map_err(|_|error!(could_not_parse_record,line_number,text.to_string()).with_message(format!("could not parse the field `{}`",field)))
}

fn check_fields(fields:&[&str], expected:usize, line_number:usize) -> Result<(),Error>
{
	if fields.len()!=expected
	{
		return Err(error!(could_not_parse_record,line_number,fields.join(",")).with_message(format!("expected {} fields, found {}",expected,fields.len())));
	}
	Ok(())
}

fn parse_path(field:&str, line_number:usize) -> Result<Vec<usize>,Error>
{
	field.split_whitespace().map(|node|parse_field(node,line_number,field)).collect()
}

///Read `(source, dest, port)` connectivity records, of a single router or of all.
pub fn read_connectivity<R:BufRead>(reader:R, router:Option<usize>) -> Result<Vec<(usize,usize,usize)>,Error>
{
	let mut records=vec![];
	for_each_record(reader,router,|line_number,fields|{
		check_fields(fields,3,line_number)?;
		let source:usize=parse_field(fields[0],line_number,fields[0])?;
		let destination:usize=parse_field(fields[1],line_number,fields[1])?;
		let port:usize=parse_field(fields[2],line_number,fields[2])?;
		records.push((source,destination,port));
		Ok(())
	})?;
	Ok(records)
}

///Read the routing table of a router.
pub fn read_routing<R:BufRead>(reader:R, router:usize) -> Result<RoutingTable,Error>
{
	let mut table=RoutingTable::new();
	for_each_record(reader,Some(router),|line_number,fields|{
		check_fields(fields,3,line_number)?;
		let destination:usize=parse_field(fields[1],line_number,fields[1])?;
		table.push(destination,parse_path(fields[2],line_number)?);
		Ok(())
	})?;
	Ok(table)
}

///Read the weighted routing table of a router.
pub fn read_weighted_routing<R:BufRead>(reader:R, router:usize) -> Result<WeightedRoutingTable,Error>
{
	let mut table=WeightedRoutingTable::new();
	for_each_record(reader,Some(router),|line_number,fields|{
		check_fields(fields,4,line_number)?;
		let destination:usize=parse_field(fields[1],line_number,fields[1])?;
		let weight:f64=parse_field(fields[2],line_number,fields[2])?;
		table.push(destination,weight,parse_path(fields[3],line_number)?);
		Ok(())
	})?;
	Ok(table)
}

///Parse a connectivity written as `"dest, port, port; dest, port"`.
pub fn parse_inline_connectivity(text:&str) -> Result<ConnectivityMap,Error>
{
	let mut map=ConnectivityMap::new();
	for (index,entry) in text.split(';').enumerate()
	{
		let entry=entry.trim();
		if entry.is_empty()
		{
			continue;
		}
		let numbers:Vec<usize>=entry.split(',').map(|word|parse_field(word.trim(),index+1,entry)).collect::<Result<_,_>>()?;
		if numbers.len()<2
		{
			return Err(error!(could_not_parse_record,index+1,entry.to_string()).with_message("a connectivity entry needs a destination and at least a port".to_string()));
		}
		for &port in numbers[1..].iter()
		{
			map.insert(numbers[0],port);
		}
	}
	Ok(map)
}

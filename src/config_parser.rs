/*!

Parser of the configuration syntax, in the form produced by `gramatica` from the grammar

```text
Value    := LitStr | Number | Object | Array | true | false
Object   := Ident | Ident { } | Ident { Members } | Ident { Members , }
Members  := Pair | Members , Pair
Pair     := Ident : Value
Array    := [ ] | [ Elements ] | [ Elements , ]
Elements := Value | Elements , Value
```

Whitespace, `//` line comments and `/* */` block comments are skipped.

*/

extern crate gramatica;
use std::cmp::Ordering;
use self::gramatica::{Associativity,EarleyKind,State,Parser,ParsingTablesTrait,ParsingError};
use std::fmt::{Display,Formatter,Error};

#[derive(Clone,Debug,PartialEq,PartialOrd)]
pub enum ConfigurationValue{
Literal(String),
Number(f64),
Object(String,Vec<(String,ConfigurationValue)>),
Array(Vec<ConfigurationValue>),
True,
False,
None,
}

impl Default for ConfigurationValue {
fn default()->ConfigurationValue{
ConfigurationValue::None}

}

impl ConfigurationValue
{
	fn write(&self, f: &mut Formatter, indent:usize) -> Result<(),Error>
	{
		let is=String::from("\t").repeat(indent);
		write!(f,"{}",is)?;
		match self
		{
			&ConfigurationValue::Literal(ref s) => write!(f,"\"{}\"",s)?,
			&ConfigurationValue::Number(v) => write!(f,"{}",v)?,
			&ConfigurationValue::Object(ref name, ref list) =>
			{
				writeln!(f,"{}\n{}{{",name,is)?;
				for &(ref attr_name,ref attr_value) in list.iter()
				{
					writeln!(f,"{}\t{}:",is,attr_name)?;
					attr_value.write(f,indent+1)?;
					writeln!(f,",")?;
				}
				write!(f,"{}}}",is)?;
			},
			&ConfigurationValue::Array(ref list) =>
			{
				writeln!(f,"[")?;
				for elem in list.iter()
				{
					elem.write(f,indent+1)?;
					writeln!(f,",")?;
				}
				write!(f,"{}]",is)?;
			},
			&ConfigurationValue::True => write!(f,"true")?,
			&ConfigurationValue::False => write!(f,"false")?,
			&ConfigurationValue::None => write!(f,"NONE VALUE")?,
		};
		Ok(())
	}
}

impl Display for ConfigurationValue {
fn fmt(&self,f:&mut Formatter)->Result<(),Error>{
self.write(f,0)}

}

///Parse a whole configuration source into a `Token::Value`.
pub fn parse(source:& str)->Result<Token,ParsingError>{
Parser::<Token,ParsingTables>::parse(source,None,0)}

#[derive(Clone,Debug,PartialEq)]
pub enum Token{DummyStart,
True,False,Number(f64),LitStr(String),Ident(String),LBrace,RBrace,LBracket,RBracket,Comma,Colon,Value(ConfigurationValue),Object(ConfigurationValue),Members(Vec<(String,ConfigurationValue)>),Pair(String,ConfigurationValue),Array(Vec<ConfigurationValue>),Elements(Vec<ConfigurationValue>),}
impl Default for Token { fn default()->Self{Token::DummyStart} }
struct ParsingTables { }
impl ParsingTablesTrait<Token> for ParsingTables {
fn initial()->usize { 12 }
#[allow(unused)]
fn match_some(parser: &mut Parser<Token,Self>) -> Option<(usize,Token)> { let source=parser.cursor;
match { match parser.keyword("true",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::True)), };
match { match parser.keyword("false",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::False)), };
match { match parser.re("-?[0-9]*\\.?[0-9]+([eE][-+]?[0-9]+)?",source) { None => None, Some((size,string)) => string.parse::<f64>().ok().map(|v|(size,v)) } }
{ None => (), Some((size,result)) => return Some((size,Token::Number(result))), };
{ fn _match(parser:&mut Parser<Token,ParsingTables>,source:& str)->Option<(usize,String)>{
let mut ret=None;
let mut characters=source.chars();
if (characters.next()) != (Some('"')) {} else {let mut size=1;
let mut r=String::new();
loop {match characters.next() { None => break, Some('"') => {ret = { Some((size + 1,r))};
break;}, Some('\\') => {match characters.next() { None => break, Some(c) => {r.push('\\');
r.push(c);}, }
;
size += 2;}, Some(c) => {r.push(c);
size += 1;}, }
;}}
ret}

match _match(parser,source) { None=>(), Some((size,result)) => return Some((size,Token::LitStr(result))), } };
match { match parser.re("[a-zA-Z\\x80-\\xff_][a-zA-Z0-9\\x80-\\xff_]*",source) { None => None, Some((size,string)) => Some((size,string.to_string())) } }
{ None => (), Some((size,result)) => return Some((size,Token::Ident(result))), };
match { match parser.re("\\{",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::LBrace)), };
match { match parser.re("\\}",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::RBrace)), };
match { match parser.re("\\[",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::LBracket)), };
match { match parser.re("\\]",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::RBracket)), };
match { match parser.re(",",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::Comma)), };
match { match parser.re(":",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::Colon)), };
match { match parser.re("\\s+|\n|//[^\n]*\n|/\\*([^*]|\\*+[^/])*\\*+/",source) { None => None, Some((size,_string)) => Some((size,())) } }
{ None => (), Some((size,_result)) => return Some((size,Token::DummyStart)), };
None }//match_some
fn predict(parser:&mut Parser<Token,Self>,index:usize,state_index:usize,token:usize) { match token {
12 => {
parser.sets[index].predict(State::new(1,12,vec![4],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(2,12,vec![3],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(3,12,vec![13],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(4,12,vec![16],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(5,12,vec![1],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(6,12,vec![2],index,EarleyKind::Predict(state_index)));
}
13 => {
parser.sets[index].predict(State::new(7,13,vec![5],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(8,13,vec![5,6,7],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(9,13,vec![5,6,14,7],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(10,13,vec![5,6,14,10,7],index,EarleyKind::Predict(state_index)));
}
14 => {
parser.sets[index].predict(State::new(11,14,vec![15],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(12,14,vec![14,10,15],index,EarleyKind::Predict(state_index)));
}
15 => {
parser.sets[index].predict(State::new(13,15,vec![5,11,12],index,EarleyKind::Predict(state_index)));
}
16 => {
parser.sets[index].predict(State::new(14,16,vec![8,9],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(15,16,vec![8,17,9],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(16,16,vec![8,17,10,9],index,EarleyKind::Predict(state_index)));
}
17 => {
parser.sets[index].predict(State::new(17,17,vec![12],index,EarleyKind::Predict(state_index)));
parser.sets[index].predict(State::new(18,17,vec![17,10,12],index,EarleyKind::Predict(state_index)));
}
_ => panic!(""), } }//predict
#[allow(unused)]
fn compute_value(state:&mut State<Token>) { state.computed_value = Some( match state.rule { 0 => state.values[0].clone(),
1 => match &mut state.values[0] {
Token::LitStr(ref s) => Token::Value(ConfigurationValue::Literal(s.clone())),
_ => panic!(""), },
2 => match &mut state.values[0] {
Token::Number(ref v) => Token::Value(ConfigurationValue::Number(* v)),
_ => panic!(""), },
3 => match &mut state.values[0] {
Token::Object(ref mut value) => Token::Value(std::mem::take(value)),
_ => panic!(""), },
4 => match &mut state.values[0] {
Token::Array(ref mut list) => Token::Value(ConfigurationValue::Array(std::mem::take(list))),
_ => panic!(""), },
5 => match &mut state.values[0] {
Token::True => Token::Value(ConfigurationValue::True),
_ => panic!(""), },
6 => match &mut state.values[0] {
Token::False => Token::Value(ConfigurationValue::False),
_ => panic!(""), },
7 => match &mut state.values[0] {
Token::Ident(ref name) => Token::Object(ConfigurationValue::Object(name.clone(),vec![])),
_ => panic!(""), },
8 => match &mut state.values[0..3] {
&mut [Token::Ident(ref name),Token::LBrace,Token::RBrace] => Token::Object(ConfigurationValue::Object(name.clone(),vec![])),
_ => panic!(""), },
9 => match &mut state.values[0..4] {
&mut [Token::Ident(ref name),Token::LBrace,Token::Members(ref mut list),Token::RBrace] => Token::Object(ConfigurationValue::Object(name.clone(),std::mem::take(list))),
_ => panic!(""), },
10 => match &mut state.values[0..5] {
&mut [Token::Ident(ref name),Token::LBrace,Token::Members(ref mut list),Token::Comma,Token::RBrace] => Token::Object(ConfigurationValue::Object(name.clone(),std::mem::take(list))),
_ => panic!(""), },
11 => match &mut state.values[0] {
Token::Pair(ref s,ref mut value) => Token::Members(vec![(s.clone(),std::mem::take(value))]),
_ => panic!(""), },
12 => match &mut state.values[0..3] {
&mut [Token::Members(ref mut list),Token::Comma,Token::Pair(ref s,ref mut value)] => Token::Members({let mut new=std::mem::take(list);
new.push((s.clone(),std::mem::take(value))); new}),
_ => panic!(""), },
13 => match &mut state.values[0..3] {
&mut [Token::Ident(ref s),Token::Colon,Token::Value(ref mut value)] => Token::Pair(s.clone(),std::mem::take(value)),
_ => panic!(""), },
14 => match &mut state.values[0..2] {
&mut [Token::LBracket,Token::RBracket] => Token::Array(vec![]),
_ => panic!(""), },
15 => match &mut state.values[0..3] {
&mut [Token::LBracket,Token::Elements(ref mut list),Token::RBracket] => Token::Array(std::mem::take(list)),
_ => panic!(""), },
16 => match &mut state.values[0..4] {
&mut [Token::LBracket,Token::Elements(ref mut list),Token::Comma,Token::RBracket] => Token::Array(std::mem::take(list)),
_ => panic!(""), },
17 => match &mut state.values[0] {
Token::Value(ref mut value) => Token::Elements(vec![std::mem::take(value)]),
_ => panic!(""), },
18 => match &mut state.values[0..3] {
&mut [Token::Elements(ref mut list),Token::Comma,Token::Value(ref mut value)] => Token::Elements({let mut new=std::mem::take(list);
new.push(std::mem::take(value)); new}),
_ => panic!(""), },
_ => panic!(""), }) }//compute_value
fn table_terminal(token_index:usize)->bool { match token_index {
1|2|3|4|5|6|7|8|9|10|11 => true,
0|12|13|14|15|16|17 => false,
_ => panic!("table_terminal"), } }//table_terminal
fn table_priority(_a:usize, _b:usize) -> Option<Ordering> { None }//table_priority
fn table_associativity(_rule:usize) -> Option<Associativity> { None }//table_associativity
fn to_usize(token:&Token) -> usize { match token { &Token::DummyStart => 0,
&Token::True => 1,
&Token::False => 2,
&Token::Number(_) => 3,
&Token::LitStr(_) => 4,
&Token::Ident(_) => 5,
&Token::LBrace => 6,
&Token::RBrace => 7,
&Token::LBracket => 8,
&Token::RBracket => 9,
&Token::Comma => 10,
&Token::Colon => 11,
&Token::Value(_) => 12,
&Token::Object(_) => 13,
&Token::Members(_) => 14,
&Token::Pair(_,_) => 15,
&Token::Array(_) => 16,
&Token::Elements(_) => 17,
} }//to_usize
}//impl

#[cfg(test)]
mod tests
{
	use super::*;
	fn value(source:&str) -> ConfigurationValue
	{
		match parse(source)
		{
			Ok(Token::Value(value)) => value,
			other => panic!("{} did not parse to a value: {:?}",source,other),
		}
	}
	#[test]
	fn nested_values()
	{
		let cv=value("FromGraph{ name: \"ring\", sizes: [1, 2.5, -3e2,], on: true, off: false, inner: Empty, also: Empty{} }");
		let expected=ConfigurationValue::Object("FromGraph".to_string(),vec![
			("name".to_string(),ConfigurationValue::Literal("ring".to_string())),
			("sizes".to_string(),ConfigurationValue::Array(vec![ConfigurationValue::Number(1.0),ConfigurationValue::Number(2.5),ConfigurationValue::Number(-300.0)])),
			("on".to_string(),ConfigurationValue::True),
			("off".to_string(),ConfigurationValue::False),
			("inner".to_string(),ConfigurationValue::Object("Empty".to_string(),vec![])),
			("also".to_string(),ConfigurationValue::Object("Empty".to_string(),vec![])),
		]);
		assert_eq!(cv,expected);
	}
	#[test]
	fn comments_are_skipped()
	{
		let cv=value("//header\nFromGraph\n{\n\tnum_routers: 4,//routers\n\t/* block */ algorithm: []\n}\n");
		assert_eq!(cv,ConfigurationValue::Object("FromGraph".to_string(),vec![
			("num_routers".to_string(),ConfigurationValue::Number(4.0)),
			("algorithm".to_string(),ConfigurationValue::Array(vec![])),
		]));
	}
	#[test]
	fn display_parses_back()
	{
		let cv=value("FromGraph{ algorithm: [\"ugal\",\"valiant\"], seed: 3 }");
		assert_eq!(value(&format!("{}",cv)),cv);
	}
	#[test]
	fn rejects_unbalanced_sources()
	{
		assert!(parse("FromGraph{ num_routers: 4").is_err());
		assert!(parse("[1,,2]").is_err());
	}
}

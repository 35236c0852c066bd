//! Mission file parsing: XML in, an in-memory [`Mission`] out (§6, §11).
//!
//! No pack example happens to parse XML, so `quick_xml` is imported fresh
//! here rather than reused from an existing dependency; everything else
//! about the shape (event loop over `Reader::read_event_into`) is the
//! standard way that crate is used.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::fluent::{CardinalityKind, LocationId, ObjectValue, PersistenceCondition, StateVariable};
use crate::model::ModelPool;
use crate::organization::OrganizationModel;
use crate::temporal::{QualitativeRelation, TimepointId};

use super::error::ParseError;
use super::mission::Mission;

fn get_attr(e: &BytesStart, key: &str) -> Result<String, ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(ParseError::MissingField(key.to_string()))
}

fn parse_u32(field: &str, value: &str) -> Result<u32, ParseError> {
    value.parse::<u32>().map_err(|_| ParseError::InvalidInteger {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_relation(symbol: &str) -> Result<QualitativeRelation, ParseError> {
    Ok(match symbol {
        "<" => QualitativeRelation::LESS,
        ">" => QualitativeRelation::GREATER,
        "=" => QualitativeRelation::EQUAL,
        "<=" | "\u{2264}" => QualitativeRelation::LESS_OR_EQUAL,
        ">=" | "\u{2265}" => QualitativeRelation::GREATER_OR_EQUAL,
        "!=" | "\u{2260}" => QualitativeRelation::NOT_EQUAL,
        other => return Err(ParseError::UnknownRelation(other.to_string())),
    })
}

fn parse_cardinality_kind(symbol: &str) -> Result<CardinalityKind, ParseError> {
    Ok(match symbol.to_ascii_uppercase().as_str() {
        "MIN" => CardinalityKind::Min,
        "MAX" => CardinalityKind::Max,
        "EXACT" => CardinalityKind::Exact,
        other => return Err(ParseError::UnknownCardinalityKind(other.to_string())),
    })
}

fn local_name(e: &BytesStart) -> Vec<u8> {
    e.name().as_ref().to_vec()
}

/// Parses a mission XML document into an in-memory [`Mission`], resolving
/// organization-model seeding (requested resources) through `organization`
/// as it goes.
pub fn parse_mission_xml(
    xml: &str,
    organization: &dyn OrganizationModel,
) -> Result<Mission, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut mission: Option<Mission> = None;
    let mut labels: HashMap<String, TimepointId> = HashMap::new();
    let mut locations: HashMap<String, LocationId> = HashMap::new();
    let mut model_pool = ModelPool::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) => {
                let name = local_name(&e);
                match name.as_slice() {
                    b"mission" => {
                        let mission_name = get_attr(&e, "name").unwrap_or_else(|_| "mission".to_string());
                        mission = Some(Mission::new(mission_name, organization)?);
                    }
                    b"timepoint" => {
                        let mission = mission.as_mut().ok_or_else(|| {
                            ParseError::MissingField("<mission> must precede <timepoint>".to_string())
                        })?;
                        let label = get_attr(&e, "label")?;
                        let id = mission.add_qualitative_timepoint(labels.len());
                        labels.insert(label, id);
                    }
                    b"interval" => {
                        let mission = mission.as_mut().ok_or_else(|| {
                            ParseError::MissingField("<mission> must precede <interval>".to_string())
                        })?;
                        let from_label = get_attr(&e, "from")?;
                        let to_label = get_attr(&e, "to")?;
                        let from = *labels
                            .get(&from_label)
                            .ok_or_else(|| ParseError::UnknownLabel(from_label.clone()))?;
                        let to = *labels
                            .get(&to_label)
                            .ok_or_else(|| ParseError::UnknownLabel(to_label.clone()))?;
                        mission.add_interval(from, to);
                    }
                    b"location" => {
                        let mission = mission.as_mut().ok_or_else(|| {
                            ParseError::MissingField("<mission> must precede <location>".to_string())
                        })?;
                        let location_name = get_attr(&e, "name")?;
                        let id = mission.add_location(location_name.clone());
                        locations.insert(location_name, id);
                    }
                    b"constraint" => {
                        let mission = mission.as_mut().ok_or_else(|| {
                            ParseError::MissingField("<mission> must precede <constraint>".to_string())
                        })?;
                        let from_label = get_attr(&e, "from")?;
                        let to_label = get_attr(&e, "to")?;
                        let relation = parse_relation(&get_attr(&e, "relation")?)?;
                        let from = *labels
                            .get(&from_label)
                            .ok_or_else(|| ParseError::UnknownLabel(from_label.clone()))?;
                        let to = *labels
                            .get(&to_label)
                            .ok_or_else(|| ParseError::UnknownLabel(to_label.clone()))?;
                        mission.add_temporal_constraint(from, to, relation);
                    }
                    b"persistence-condition" => {
                        let mission = mission.as_mut().ok_or_else(|| {
                            ParseError::MissingField(
                                "<mission> must precede <persistence-condition>".to_string(),
                            )
                        })?;
                        let resource = get_attr(&e, "resource")?;
                        let location_name = get_attr(&e, "location")?;
                        let from_label = get_attr(&e, "from")?;
                        let to_label = get_attr(&e, "to")?;
                        let kind = parse_cardinality_kind(&get_attr(&e, "kind")?)?;
                        let n = parse_u32("n", &get_attr(&e, "n")?)?;

                        let location = *locations
                            .get(&location_name)
                            .ok_or_else(|| ParseError::UnknownLabel(location_name.clone()))?;
                        let from = *labels
                            .get(&from_label)
                            .ok_or_else(|| ParseError::UnknownLabel(from_label.clone()))?;
                        let to = *labels
                            .get(&to_label)
                            .ok_or_else(|| ParseError::UnknownLabel(to_label.clone()))?;

                        mission.request_resource(resource.clone());
                        mission.add_persistence_condition(PersistenceCondition::new(
                            StateVariable::new("at", resource),
                            ObjectValue::LocationCardinality { location, n, kind },
                            from,
                            to,
                        ));
                    }
                    b"model" => {
                        let iri = get_attr(&e, "iri")?;
                        let count = parse_u32("count", &get_attr(&e, "count")?)?;
                        model_pool.set(iri, count);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        buf.clear();
    }

    let mut mission = mission.ok_or_else(|| ParseError::MissingField("<mission>".to_string()))?;
    mission.set_model_pool(model_pool);
    Ok(mission)
}

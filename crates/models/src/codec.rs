//! Document form of an entity: its attributes plus the type tag under
//! [`CLASS_KEY`]. This is what the file store writes.
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::object::{with_model, Object};
use crate::registry;

/// Reserved attribute carrying the type tag.
pub const CLASS_KEY: &str = "__class__";

pub type Document = Map<String, Value>;

/// Export every persisted field of `obj` plus its type tag.
pub fn to_document(obj: &Object) -> Result<Document, ModelError> {
    let value = with_model!(obj, m => serde_json::to_value(m))
        .map_err(|e| ModelError::MalformedRecord(e.to_string()))?;
    let Value::Object(mut doc) = value else {
        return Err(ModelError::MalformedRecord(format!("{} did not encode to a mapping", obj.key())));
    };
    doc.insert(CLASS_KEY.to_string(), Value::String(obj.class().as_str().to_string()));
    Ok(doc)
}

/// Rebuild an entity from its document. Unknown attributes are ignored.
pub fn from_document(mut doc: Document) -> Result<Object, ModelError> {
    let tag = match doc.remove(CLASS_KEY) {
        Some(Value::String(tag)) => tag,
        Some(other) => return Err(ModelError::MalformedRecord(format!("{CLASS_KEY} is not a string: {other}"))),
        None => return Err(ModelError::MalformedRecord(format!("missing {CLASS_KEY}"))),
    };
    let descriptor = registry::resolve(&tag)
        .map_err(|_| ModelError::MalformedRecord(format!("unknown type tag {tag:?}")))?;
    descriptor.construct(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_model::BaseModel;
    use crate::{amenity, city, place, review, state, user};
    use serde_json::json;

    fn samples() -> Vec<Object> {
        let st = state::Model::new("California").unwrap();
        let ct = city::Model::new(&st.id, "San Francisco").unwrap();
        let mut us = user::Model::new("betty@holberton.io", "pwd").unwrap();
        us.first_name = Some("Betty".into());
        let mut pl = place::Model::new(&ct.id, &us.id, "Lovely place").unwrap();
        pl.number_rooms = 3;
        pl.price_by_night = 120;
        pl.latitude = Some(37.7749);
        pl.description = Some("with a view".into());
        let rv = review::Model::new(&pl.id, &us.id, "Great stay").unwrap();
        vec![
            BaseModel::new().into(),
            st.into(),
            ct.into(),
            us.into(),
            amenity::Model::new("Wifi").unwrap().into(),
            pl.into(),
            rv.into(),
        ]
    }

    #[test]
    fn every_type_survives_encode_and_decode() {
        for obj in samples() {
            let doc = to_document(&obj).unwrap();
            assert_eq!(doc[CLASS_KEY], json!(obj.class().as_str()));
            assert_eq!(doc["id"], json!(obj.id()));
            assert!(doc.contains_key("created_at") && doc.contains_key("updated_at"));
            assert_eq!(from_document(doc).unwrap(), obj);
        }
    }

    #[test]
    fn survives_a_trip_through_json_text() {
        let obj: Object = state::Model::new("Nevada").unwrap().into();
        let text = serde_json::to_string(&to_document(&obj).unwrap()).unwrap();
        let doc: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(from_document(doc).unwrap(), obj);
    }

    #[test]
    fn coordinates_survive_a_trip_through_json_text() {
        let mut pl = place::Model::new("city-1", "user-1", "Lanai").unwrap();
        pl.latitude = Some(22.717054650590082);
        pl.longitude = Some(-0.1 - 0.2);
        let obj: Object = pl.into();
        let text = serde_json::to_string(&to_document(&obj).unwrap()).unwrap();
        let doc: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(from_document(doc).unwrap(), obj);
    }

    #[test]
    fn missing_or_unknown_tag_is_malformed() {
        let mut doc = to_document(&state::Model::new("Texas").unwrap().into()).unwrap();
        doc.remove(CLASS_KEY);
        assert!(matches!(from_document(doc.clone()), Err(ModelError::MalformedRecord(_))));

        doc.insert(CLASS_KEY.into(), json!("Spaceship"));
        assert!(matches!(from_document(doc.clone()), Err(ModelError::MalformedRecord(_))));

        doc.insert(CLASS_KEY.into(), json!(7));
        assert!(matches!(from_document(doc), Err(ModelError::MalformedRecord(_))));
    }

    #[test]
    fn missing_field_is_malformed() {
        let doc = json!({ "__class__": "State", "id": "abc", "name": "Ohio" });
        let Value::Object(doc) = doc else { unreachable!() };
        assert!(matches!(from_document(doc), Err(ModelError::MalformedRecord(_))));
    }

    #[test]
    fn extra_attributes_are_ignored() {
        let obj: Object = amenity::Model::new("Pool").unwrap().into();
        let mut doc = to_document(&obj).unwrap();
        doc.insert("_sa_instance_state".into(), json!("ignored"));
        assert_eq!(from_document(doc).unwrap(), obj);
    }
}

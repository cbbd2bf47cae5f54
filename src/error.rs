use js_sys::{Object, Reflect};
use pixelmap::GmapError;
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Error object for a core failure, with the offending ids under `data`.
pub fn from_gmap(e: &GmapError) -> JsValue {
    let d = new_obj();
    let data = match *e {
        GmapError::DartOutOfRange { dart, n_darts } => {
            set_kv(&d, "dart", &JsValue::from_f64(dart as f64));
            set_kv(&d, "n_darts", &JsValue::from_f64(n_darts as f64));
            Some(d.into())
        }
        GmapError::RemovedDart(dart) | GmapError::NotRemovable { dart, .. } | GmapError::NegativeWeight { dart, .. } => {
            set_kv(&d, "dart", &JsValue::from_f64(dart as f64));
            Some(d.into())
        }
        GmapError::PixelOutOfRange { row, col } => {
            set_kv(&d, "row", &JsValue::from_f64(row as f64));
            set_kv(&d, "col", &JsValue::from_f64(col as f64));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), e.to_string(), data)
}

#[inline]
pub fn result(r: Result<JsValue, GmapError>) -> JsValue {
    match r {
        Ok(v) => ok(v),
        Err(e) => from_gmap(&e),
    }
}

use js_sys::{Float64Array, Reflect, Uint32Array};
use pixelmap_wasm::{pyramidal_dt_res, PixelMap};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn value(v: &JsValue) -> JsValue {
    assert_eq!(Reflect::get(v, &JsValue::from_str("ok")).unwrap().as_bool(), Some(true));
    Reflect::get(v, &JsValue::from_str("value")).unwrap()
}

#[wasm_bindgen_test]
fn propagate_and_read_typed_arrays() {
    let mut m = PixelMap::new(2, 2, vec![0, 1, 1, 1], 3).unwrap();
    assert_eq!(m.n_darts(), 32);
    let r = m.propagate_res(0, 3, vec![0], vec![], None);
    value(&r);
    let dt = m.dt_image(vec![0, 1], false).to_vec();
    assert_eq!(dt, vec![0.0, 1.0, 1.0, 2.0]);
    assert_eq!(m.distances().length(), 32);

    let face = Uint32Array::new(&value(&m.cell_res(2, 0)));
    assert_eq!(face.length(), 8);
}

#[wasm_bindgen_test]
fn bad_inputs_return_typed_errors() {
    let mut m = PixelMap::from_shape(2, 2, true, 0).unwrap();
    assert!(is_err(&m.alpha_res(3, 0), "invalid_dimension"));
    assert!(is_err(&m.alpha_res(0, 1000), "out_of_range"));
    assert!(is_err(&m.propagate_res(9, 0, vec![0], vec![], None), "invalid_strategy"));
    assert!(is_err(&m.propagate_res(0, 9, vec![0], vec![], None), "invalid_accumulation"));
    assert!(is_err(&m.remove_edges_res(-0.5), "invalid_reduction_factor"));
    assert!(is_err(&m.set_weights_res(vec![0.5; 32]), "non_integer"));
    assert!(is_err(&m.set_weights_res(vec![1.0; 3]), "size_mismatch"));
    assert!(is_err(&pyramidal_dt_res(2, 2, vec![0, 1, 1, 1], 0), "invalid_stride"));
    assert!(PixelMap::from_json("{}", 0).is_err());
}

#[wasm_bindgen_test]
fn pyramid_returns_float_array() {
    let dt = Float64Array::new(&value(&pyramidal_dt_res(2, 2, vec![1, 0, 1, 1], 1)));
    assert_eq!(dt.to_vec(), vec![1.0, 0.0, 2.0, 1.0]);
}

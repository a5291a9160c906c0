use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Tags read from each slice
pub use dicom_dictionary_std::tags::{
    COLUMNS, IMAGER_PIXEL_SPACING, INSTANCE_NUMBER, PIXEL_SPACING, ROWS, SERIES_DESCRIPTION,
    SERIES_NUMBER,
};

/// Trimmed text of `tag`, `None` when absent or not convertible
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    let text = dcm.element(tag).ok()?.to_str().ok()?;
    Some(text.trim().to_string())
}

/// Integer value of `tag` (IS strings included)
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i32> {
    dcm.element(tag).ok()?.to_int().ok()
}

/// Unsigned short value of `tag`, as used by Rows and Columns
pub fn get_u16_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u16> {
    dcm.element(tag).ok()?.to_int().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};

    #[test]
    fn test_tag_values() {
        assert_eq!(PIXEL_SPACING, Tag(0x0028, 0x0030));
        assert_eq!(SERIES_DESCRIPTION, Tag(0x0008, 0x103E));
        assert_eq!(INSTANCE_NUMBER, Tag(0x0020, 0x0013));
    }

    #[test]
    fn test_value_helpers() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            SERIES_DESCRIPTION,
            VR::LO,
            PrimitiveValue::from("ACR T1 "),
        ));
        dcm.put(DataElement::new(
            INSTANCE_NUMBER,
            VR::IS,
            PrimitiveValue::from("11"),
        ));
        dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(256_u16)));

        assert_eq!(
            get_string_value(&dcm, SERIES_DESCRIPTION),
            Some("ACR T1".to_string())
        );
        assert_eq!(get_int_value(&dcm, INSTANCE_NUMBER), Some(11));
        assert_eq!(get_u16_value(&dcm, ROWS), Some(256));
        assert_eq!(get_string_value(&dcm, SERIES_NUMBER), None);
    }
}

//! Decoding and query tests over encoded navigation mesh streams
//!
//! These exercise the full path from raw bytes to nearest-point answers,
//! including the corrupted-record cases seen in shipped zone assets.

#[cfg(test)]
mod tests {
    use crate::{ByteStream, Edge, NavData, NavDataWriter, SegmentSet};
    use glam::Vec3;
    use wiznav_common::Error;

    fn square_mesh() -> NavDataWriter {
        let mut writer = NavDataWriter::new();
        writer
            .push_vertex(Vec3::new(0.0, 0.0, 0.0))
            .push_vertex(Vec3::new(10.0, 0.0, 0.0))
            .push_vertex(Vec3::new(10.0, 2.0, 10.0))
            .push_vertex(Vec3::new(0.0, 2.0, 10.0))
            .push_edge(0, 1)
            .push_edge(1, 2)
            .push_edge(2, 3)
            .push_edge(3, 0);
        writer
    }

    /// Records declared as [0, 1, 3, 2] with a scan bound of 4
    fn out_of_sequence_mesh() -> NavDataWriter {
        let mut writer = NavDataWriter::new().with_vertex_max(4);
        writer
            .push_raw_vertex(Vec3::new(0.0, 0.0, 0.0), 0)
            .push_raw_vertex(Vec3::new(1.0, 0.0, 0.0), 1)
            .push_raw_vertex(Vec3::new(9.0, 9.0, 9.0), 3)
            .push_raw_vertex(Vec3::new(2.0, 0.0, 0.0), 2)
            .push_edge(0, 1)
            .push_edge(1, 2);
        writer
    }

    #[test]
    fn test_decode_is_deterministic() {
        let bytes = square_mesh().to_bytes().unwrap();

        let first = NavData::from_bytes(bytes.clone()).unwrap();
        let second = NavData::from_bytes(bytes).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.vertex_count(), 4);
        assert_eq!(first.edge_count(), 4);
        assert_eq!(first.discarded_records, 0);
    }

    #[test]
    fn test_out_of_sequence_record_is_discarded() {
        let data = NavData::from_bytes(out_of_sequence_mesh().to_bytes().unwrap()).unwrap();

        assert_eq!(data.vertex_count(), 3);
        assert_eq!(
            data.vertices,
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ]
        );
        assert_eq!(data.discarded_records, 1);
        assert_eq!(data.declared_vertex_count, 4);
        assert_eq!(data.edges, vec![Edge::new(0, 1), Edge::new(1, 2)]);
    }

    #[test]
    fn test_edges_follow_last_consumed_record() {
        // Every record is rejected; the bound shrinks to zero after two reads
        let mut writer = NavDataWriter::new().with_vertex_max(2);
        writer
            .push_raw_vertex(Vec3::ONE, 5)
            .push_raw_vertex(Vec3::ONE, 6)
            .push_edge(0, 1)
            .push_edge(4, 7)
            .push_edge(2, 2);

        let data = NavData::from_bytes(writer.to_bytes().unwrap()).unwrap();
        assert!(data.vertices.is_empty());
        assert_eq!(data.discarded_records, 2);
        assert_eq!(data.edge_count(), 3);
        assert_eq!(data.edges[1], Edge::new(4, 7));

        // Edge indices are not validated until geometry is built
        assert!(matches!(
            SegmentSet::build(&data),
            Err(Error::IndexOutOfRange { edge: 0, index: 0, vertex_count: 0 })
        ));
    }

    #[test]
    fn test_non_positive_vertex_max_reads_no_records() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&3i16.to_le_bytes());
        bytes.extend_from_slice(&(-1i16).to_le_bytes());
        bytes.extend_from_slice(&0i16.to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&0i16.to_le_bytes());
        bytes.extend_from_slice(&1i16.to_le_bytes());

        let data = NavData::from_bytes(bytes).unwrap();
        assert!(data.vertices.is_empty());
        assert_eq!(data.edges, vec![Edge::new(0, 1)]);
    }

    #[test]
    fn test_negative_edge_count_decodes_no_edges() {
        let mut writer = NavDataWriter::new();
        writer.push_vertex(Vec3::ZERO);
        let mut bytes = writer.to_bytes().unwrap();
        let len = bytes.len();
        bytes[len - 4..].copy_from_slice(&(-3i32).to_le_bytes());

        let data = NavData::from_bytes(bytes).unwrap();
        assert_eq!(data.vertex_count(), 1);
        assert!(data.edges.is_empty());
    }

    #[test]
    fn test_truncated_vertex_record_fails() {
        let bytes = square_mesh().to_bytes().unwrap();
        // Header plus one full record plus half of the next
        let cut = crate::HEADER_SIZE + crate::VERTEX_RECORD_SIZE + 7;

        let result = NavData::from_bytes(&bytes[..cut]);
        assert!(
            matches!(result, Err(Error::TruncatedData { .. })),
            "expected truncated data, got {:?}",
            result
        );
    }

    #[test]
    fn test_truncated_edge_list_fails() {
        let bytes = square_mesh().to_bytes().unwrap();
        let result = NavData::from_bytes(&bytes[..bytes.len() - 2]);
        assert!(matches!(
            result,
            Err(Error::TruncatedData { needed: 2, remaining: 0 })
        ));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut bytes = square_mesh().to_bytes().unwrap();
        bytes.extend_from_slice(&[0xFF; 5]);

        let mut stream = ByteStream::new(bytes);
        let data = NavData::parse(&mut stream).unwrap();
        assert_eq!(data.edge_count(), 4);
        assert_eq!(stream.remaining(), 5);
    }

    #[test]
    fn test_parse_payload_after_split() {
        let mut asset = b"NAVHDR01".to_vec();
        asset.extend_from_slice(&square_mesh().to_bytes().unwrap());

        let stream = ByteStream::new(asset);
        let (mut header, mut payload) = stream.split(8).unwrap();
        assert_eq!(header.read_u64().unwrap(), u64::from_le_bytes(*b"NAVHDR01"));

        let data = NavData::parse(&mut payload).unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_nearest_point_projects_onto_segment() {
        let mut writer = NavDataWriter::new();
        writer
            .push_vertex(Vec3::new(0.0, 0.0, 0.0))
            .push_vertex(Vec3::new(10.0, 0.0, 0.0))
            .push_edge(0, 1);
        let data = NavData::from_bytes(writer.to_bytes().unwrap()).unwrap();
        let segments = SegmentSet::build(&data).unwrap();

        let nearest = segments.nearest_point(Vec3::new(5.0, 3.0, 0.0)).unwrap();
        assert_eq!(nearest.point, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(nearest.segment, 0);

        let clamped = segments.nearest_point(Vec3::new(-5.0, 0.0, 0.0)).unwrap();
        assert_eq!(clamped.point, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_nearest_point_on_empty_mesh() {
        let data = NavData::from_bytes(NavDataWriter::new().to_bytes().unwrap()).unwrap();
        let segments = SegmentSet::build(&data).unwrap();

        assert!(segments.is_empty());
        assert_eq!(segments.nearest_point(Vec3::new(1.0, 2.0, 3.0)), None);
    }

    #[test]
    fn test_query_at_vertex_returns_vertex() {
        let data = NavData::from_bytes(square_mesh().to_bytes().unwrap()).unwrap();
        let segments = SegmentSet::build(&data).unwrap();

        for vertex in &data.vertices {
            let nearest = segments.nearest_point(*vertex).unwrap();
            assert_eq!(nearest.point, *vertex);
            assert_eq!(nearest.distance_squared, 0.0);
        }
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_nav_data_json_export() {
        let data = NavData::from_bytes(out_of_sequence_mesh().to_bytes().unwrap()).unwrap();

        let json = serde_json::to_string_pretty(&data).unwrap();
        let restored: NavData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, data);
    }
}
